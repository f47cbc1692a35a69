//! Implements the rules of chess: board representation, reversible move
//! application and legal move generation.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]

use std::ops;
use std::fmt;
use std::mem;
use std::str::FromStr;
use std::convert::TryFrom;
use error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(ParseColorError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl TryFrom<usize> for Color {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Color>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Pawn => "P",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Rook => "R",
            Piece::Queen => "Q",
            Piece::King => "K",
        }.fmt(f)
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P"|"p" => Ok(Piece::Pawn),
            "N"|"n" => Ok(Piece::Knight),
            "B"|"b" => Ok(Piece::Bishop),
            "R"|"r" => Ok(Piece::Rook),
            "Q"|"q" => Ok(Piece::Queen),
            "K"|"k" => Ok(Piece::King),
            _       => Err(ParsePieceError),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

impl TryFrom<usize> for Piece {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Piece>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Piece> for usize {
    fn from(value: Piece) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum File {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            File::A => "a",
            File::B => "b",
            File::C => "c",
            File::D => "d",
            File::E => "e",
            File::F => "f",
            File::G => "g",
            File::H => "h",
        }.fmt(f)
    }
}

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a"|"A" => Ok(File::A),
            "b"|"B" => Ok(File::B),
            "c"|"C" => Ok(File::C),
            "d"|"D" => Ok(File::D),
            "e"|"E" => Ok(File::E),
            "f"|"F" => Ok(File::F),
            "g"|"G" => Ok(File::G),
            "h"|"H" => Ok(File::H),
            _       => Err(ParseFileError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl TryFrom<usize> for File {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, File>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Rank {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::R1 => "1",
            Rank::R2 => "2",
            Rank::R3 => "3",
            Rank::R4 => "4",
            Rank::R5 => "5",
            Rank::R6 => "6",
            Rank::R7 => "7",
            Rank::R8 => "8",
        }.fmt(f)
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Rank::R1),
            "2" => Ok(Rank::R2),
            "3" => Ok(Rank::R3),
            "4" => Ok(Rank::R4),
            "5" => Ok(Rank::R5),
            "6" => Ok(Rank::R6),
            "7" => Ok(Rank::R7),
            "8" => Ok(Rank::R8),
            _   => Err(ParseRankError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl TryFrom<usize> for Rank {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Rank>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// Squares are numbered rank-major: `square = rank * 8 + file`, so `A1` is 0, `H1` is 7,
/// `A8` is 56 and `H8` is 63.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Square {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    A1 =  0, B1 =  1, C1 =  2, D1 =  3, E1 =  4, F1 =  5, G1 =  6, H1 =  7,
    A2 =  8, B2 =  9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H8 as usize + 1;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::try_from(((rank as usize) << 3) + file as usize).expect("INFALLIBLE")
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::try_from((self as usize) & 7).expect("INFALLIBLE")
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::try_from((self as usize) >> 3).expect("INFALLIBLE")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file().to_string() + &self.rank().to_string()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c: Vec<_> = s.chars().collect();
        if c.len() == 2 {
            Ok(Square::from_coord(c[0].to_string().parse()?, c[1].to_string().parse()?))
        } else {
            Err(ParseSquareError)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

impl TryFrom<usize> for Square {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Square>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
mod moves;
pub use moves::{Move, MoveKind};
mod position;
pub use position::Position;
mod movegen;
pub use movegen::MoveGenerator;
pub mod perft;

pub mod error;
pub use error::{Error, FenError, Result};

#[cfg(test)]
mod color_tests {
    use std::convert::TryFrom;
    use super::Color;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Color::White), "w");
        assert_eq!(format!("{}", Color::Black), "b");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("b".parse::<Color>().unwrap(), Color::Black);
        assert!("x".parse::<Color>().is_err());
    }

    #[test]
    fn not_is_the_opposite_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn usize_conversions_are_consistent() {
        assert_eq!(usize::from(Color::White), 0);
        assert_eq!(usize::from(Color::Black), 1);
        assert_eq!(Color::try_from(0).unwrap(), Color::White);
        assert_eq!(Color::try_from(1).unwrap(), Color::Black);
        assert!(Color::try_from(2).is_err());
    }
}

#[cfg(test)]
mod piece_tests {
    use std::convert::TryFrom;
    use super::Piece;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Piece::Pawn), "P");
        assert_eq!(format!("{}", Piece::Knight), "N");
        assert_eq!(format!("{}", Piece::Bishop), "B");
        assert_eq!(format!("{}", Piece::Rook), "R");
        assert_eq!(format!("{}", Piece::Queen), "Q");
        assert_eq!(format!("{}", Piece::King), "K");
    }

    #[test]
    fn fromstr_trait_accepts_both_cases() {
        for (s, piece) in &[("P", Piece::Pawn), ("N", Piece::Knight), ("B", Piece::Bishop),
                            ("R", Piece::Rook), ("Q", Piece::Queen), ("K", Piece::King)] {
            assert_eq!(s.parse::<Piece>().unwrap(), *piece);
            assert_eq!(s.to_lowercase().parse::<Piece>().unwrap(), *piece);
        }
        assert!("X".parse::<Piece>().is_err());
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for i in 0..Piece::COUNT {
            let piece = Piece::try_from(i).unwrap();
            assert_eq!(usize::from(piece), i);
        }
        assert!(Piece::try_from(Piece::COUNT).is_err());
    }
}

#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::File;
    use super::Rank;
    use super::Square;

    #[test]
    fn squares_are_numbered_rank_major() {
        assert_eq!(Square::A1 as usize, 0);
        assert_eq!(Square::H1 as usize, 7);
        assert_eq!(Square::A2 as usize, 8);
        assert_eq!(Square::A8 as usize, 56);
        assert_eq!(Square::H8 as usize, 63);
    }

    #[test]
    fn file_and_rank_methods_match_from_coord() {
        for f in 0..File::COUNT {
            for r in 0..Rank::COUNT {
                let f = File::try_from(f).unwrap();
                let r = Rank::try_from(r).unwrap();
                let s = Square::from_coord(f, r);
                assert_eq!(f, s.file());
                assert_eq!(r, s.rank());
                assert_eq!(s as usize, (r as usize) * 8 + f as usize);
            }
        }
    }

    #[test]
    fn display_and_fromstr_traits_match_file_and_rank() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).unwrap();
            assert_eq!(format!("{}", s), format!("{}{}", s.file(), s.rank()));
            assert_eq!(format!("{}", s).parse::<Square>().unwrap(), s);
        }
    }

    #[test]
    fn fromstr_trait_produces_errors_when_it_should() {
        assert!("a".parse::<Square>().is_err());
        assert!("1".parse::<Square>().is_err());
        assert!("ax".parse::<Square>().is_err());
        assert!("x1".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
    }

    #[test]
    fn out_of_bound_usize_conversion_is_an_error() {
        assert!(Square::try_from(Square::COUNT).is_err());
    }
}
