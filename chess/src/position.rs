//! Contains the structures related to the `Position`
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use super::*;

use bitboard::*;

use Color::*;
use Piece::*;

const WHITE_KING_SIDE: u8 = 0x1;
const WHITE_QUEEN_SIDE: u8 = 0x2;
const BLACK_KING_SIDE: u8 = 0x4;
const BLACK_QUEEN_SIDE: u8 = 0x8;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A snapshot of everything needed to restore a `Position` to the state it was in before the
/// most recent call to `make`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Undo {
    occ_squares: Bitboard,
    occ_by_color: [Bitboard; Color::COUNT],
    occ_by_piece: [[Bitboard; Piece::COUNT]; Color::COUNT],
    turn: Color,
    castling_rights: u8,
    ep_square: Option<Square>,
    halfmove_clock: u32,
    move_num: u32,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given point in the game, as
/// well as castling availability, en passant legality, the move clocks and the history needed
/// to reverse moves.
///
/// # Instantiation
/// There are three typical ways of creating a new `Position` structure.
///  -  The [`new`](#method.new) method creates a `Position` containing the standard starting
///     position.
///  -  The [`from_fen_str`](#method.from_fen_str) method (along with its synonyms `from_str`
///     and `str::parse`) creates a new `Position` from a string containing [Forsyth-Edwards
///     Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
///  -  The [`set_from_fen`](#method.set_from_fen) method replaces an existing position from a
///     FEN string, leaving the position untouched if the string is rejected.
///
/// # Making moves
/// [`make`](#method.make) applies a move produced by the
/// [`MoveGenerator`](struct.MoveGenerator.html) and pushes an undo record;
/// [`unmake`](#method.unmake) pops the most recent record and restores the prior state
/// exactly. `make` trusts its input: applying a move that is not legal in this position
/// leaves the position in an unspecified state.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    occ_squares: Bitboard,
    occ_by_color: [Bitboard; Color::COUNT],
    occ_by_piece: [[Bitboard; Piece::COUNT]; Color::COUNT],
    turn: Color,

    castling_rights: u8,
    ep_square: Option<Square>,

    halfmove_clock: u32,
    move_num: u32,

    history: Vec<Undo>,
}

impl Position {
    /// Returns the standard starting Position.
    pub fn new() -> Position {
        Position {
            occ_squares: Bitboard::from(0xffff_0000_0000_ffffu64),
            occ_by_color: [
                // white
                Bitboard::from(0x0000_0000_0000_ffffu64),
                // black
                Bitboard::from(0xffff_0000_0000_0000u64),
            ],
            occ_by_piece: [
                // white
                [
                    // pawns
                    Bitboard::from(0x0000_0000_0000_ff00u64),
                    // knights
                    Bitboard::from(0x0000_0000_0000_0042u64),
                    // bishops
                    Bitboard::from(0x0000_0000_0000_0024u64),
                    // rooks
                    Bitboard::from(0x0000_0000_0000_0081u64),
                    // queen
                    Bitboard::from(0x0000_0000_0000_0008u64),
                    // king
                    Bitboard::from(0x0000_0000_0000_0010u64),
                ],
                // black
                [
                    // pawns
                    Bitboard::from(0x00ff_0000_0000_0000u64),
                    // knights
                    Bitboard::from(0x4200_0000_0000_0000u64),
                    // bishops
                    Bitboard::from(0x2400_0000_0000_0000u64),
                    // rooks
                    Bitboard::from(0x8100_0000_0000_0000u64),
                    // queen
                    Bitboard::from(0x0800_0000_0000_0000u64),
                    // king
                    Bitboard::from(0x1000_0000_0000_0000u64),
                ],
            ],
            turn: White,
            castling_rights: WHITE_KING_SIDE | WHITE_QUEEN_SIDE
                | BLACK_KING_SIDE | BLACK_QUEEN_SIDE,
            ep_square: None,
            halfmove_clock: 0,
            move_num: 1,
            history: Vec::new(),
        }
    }

    /// Returns a position with an empty board.
    fn empty_board() -> Position {
        Position {
            occ_squares: Bitboard::new(),
            occ_by_color: [Bitboard::new(); Color::COUNT],
            occ_by_piece: [[Bitboard::new(); Piece::COUNT]; Color::COUNT],
            turn: White,
            castling_rights: 0,
            ep_square: None,
            halfmove_clock: 0,
            move_num: 1,
            history: Vec::new(),
        }
    }

    /// Empties the board and resets every counter and flag, including the move history.
    pub fn clear(&mut self) {
        *self = Position::empty_board();
    }

    /// Parse a position from a string containing [Forsyth-Edwards
    /// Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// The half-move clock and move number fields are optional and default to 0 and 1.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        use FenError::*;

        let mut pos = Position::empty_board();
        let mut fields = s.trim().split_whitespace();

        // parse the board
        let board = fields.next().ok_or(FieldCount)?;
        let mut r = Rank::COUNT - 1;
        let mut f = 0;
        for c in board.chars() {
            match c {
                '0' ..= '9' => {
                    let run = c.to_digit(10).expect("INFALLIBLE") as usize;
                    if run == 0 {
                        return Err(BadBoard.into());
                    }
                    f += run;
                    if f > File::COUNT {
                        return Err(BadBoard.into());
                    }
                }
                '/' => {
                    if f == File::COUNT && r > 0 {
                        r -= 1;
                        f = 0;
                    } else {
                        return Err(BadBoard.into());
                    }
                }
                _ => {
                    if f >= File::COUNT {
                        return Err(BadBoard.into());
                    }
                    let sq = Square::from_coord(
                        File::try_from(f).expect("INFALLIBLE"),
                        Rank::try_from(r).expect("INFALLIBLE"));
                    let color = if c.is_uppercase() { White } else { Black };
                    let piece: Piece = c.to_string().parse().map_err(FenError::from)?;

                    pos.occ_by_piece[color as usize][piece as usize].insert(sq);
                    f += 1;
                }
            }
        }
        if r > 0 || f < File::COUNT {
            return Err(BadBoard.into());
        }

        // parse the turn
        pos.turn = fields.next().ok_or(FieldCount)?.parse().map_err(FenError::from)?;

        // parse the castling flags
        match fields.next().ok_or(FieldCount)? {
            "-" => {},
            flags => {
                for c in flags.chars() {
                    match c {
                        'K' => pos.castling_rights |= WHITE_KING_SIDE,
                        'Q' => pos.castling_rights |= WHITE_QUEEN_SIDE,
                        'k' => pos.castling_rights |= BLACK_KING_SIDE,
                        'q' => pos.castling_rights |= BLACK_QUEEN_SIDE,
                        _ => return Err(BadCastling.into()),
                    }
                }
            },
        }

        // parse en passant square
        match fields.next().ok_or(FieldCount)? {
            "-" => {},
            sq => pos.ep_square = Some(sq.parse::<Square>().map_err(FenError::from)?),
        }

        // parse half move clock, if present
        if let Some(plies) = fields.next() {
            pos.halfmove_clock = plies.parse().map_err(|_| BadClock)?;
        }

        // parse move number, if present
        if let Some(move_num) = fields.next() {
            pos.move_num = move_num.parse().map_err(|_| BadClock)?;
        }

        pos.recompute_occupancy();

        Ok(pos)
    }

    /// Replaces this position with one parsed from a FEN string.
    ///
    /// Loading is transactional: if the string is rejected the previously loaded position
    /// remains in place, untouched.
    pub fn set_from_fen(&mut self, s: &str) -> Result<()> {
        *self = Position::from_fen_str(s)?;
        Ok(())
    }

    /// Converts the position to a FEN string.
    pub fn to_fen_str(&self) -> String {
        // the board
        let mut board = String::new();
        for r in (0..Rank::COUNT).rev() {
            let mut count = 0;
            for f in 0..File::COUNT {
                let sq = Square::from_coord(
                    File::try_from(f).expect("INFALLIBLE"),
                    Rank::try_from(r).expect("INFALLIBLE"));
                if let Some((c, p)) = self.piece_at(sq) {
                    if count > 0 {
                        board += &count.to_string();
                        count = 0;
                    }

                    if c == White {
                        board += &p.to_string();
                    } else {
                        board += &p.to_string().to_lowercase();
                    }
                } else {
                    count += 1;
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if r > 0 {
                board += "/";
            }
        }

        // castling rights
        let mut castling = String::new();
        if self.castling_rights & WHITE_KING_SIDE != 0 { castling += "K"; }
        if self.castling_rights & WHITE_QUEEN_SIDE != 0 { castling += "Q"; }
        if self.castling_rights & BLACK_KING_SIDE != 0 { castling += "k"; }
        if self.castling_rights & BLACK_QUEEN_SIDE != 0 { castling += "q"; }
        if castling.is_empty() {
            castling += "-";
        }

        // en passant square
        let ep_square = match self.ep_square {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", board, self.turn, castling, ep_square,
                                     self.halfmove_clock, self.move_num)
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the en-passant square, if any.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns `true` if king-side castling rights are available for `c`.
    pub fn has_king_side_castling_rights(&self, c: Color) -> bool {
        match c {
            White => self.castling_rights & WHITE_KING_SIDE != 0,
            Black => self.castling_rights & BLACK_KING_SIDE != 0,
        }
    }

    /// Returns `true` if queen-side castling rights are available for `c`.
    pub fn has_queen_side_castling_rights(&self, c: Color) -> bool {
        match c {
            White => self.castling_rights & WHITE_QUEEN_SIDE != 0,
            Black => self.castling_rights & BLACK_QUEEN_SIDE != 0,
        }
    }

    /// Returns `true` if any castling rights are available for `c`.
    pub fn has_castling_rights(&self, c: Color) -> bool {
        self.has_king_side_castling_rights(c) || self.has_queen_side_castling_rights(c)
    }

    /// Returns the number of plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the move number.
    pub fn move_number(&self) -> u32 {
        self.move_num
    }

    /// Returns a `Bitboard` of all occupied `Square`s.
    pub fn occupied(&self) -> Bitboard {
        self.occ_squares
    }

    /// Returns a `Bitboard` of `Square`s occupied by player `c`.
    pub fn occupied_by(&self, c: Color) -> Bitboard {
        self.occ_by_color[c as usize]
    }

    /// Returns a `Bitboard` of `Square`s occupied by the given `Piece` and `Color`.
    pub fn occupied_by_piece(&self, c: Color, p: Piece) -> Bitboard {
        self.occ_by_piece[c as usize][p as usize]
    }

    /// Returns the square where the king of the given color is located, if it has one.
    pub fn king_location(&self, c: Color) -> Option<Square> {
        self.occupied_by_piece(c, King).peek()
    }

    /// Returns the color and type of piece, if any, at the given location.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if self.occ_squares.contains(sq) {
            for c in &[White, Black] {
                if self.occupied_by(*c).contains(sq) {
                    for p in &[Pawn, Knight, Bishop, Rook, Queen, King] {
                        if self.occupied_by_piece(*c, *p).contains(sq) {
                            return Some((*c, *p));
                        }
                    }
                    unreachable!()
                }
            }
            unreachable!()
        }

        None
    }

    /// Applies a move for the side to move and pushes an undo record.
    ///
    /// The move is not validated; it must have been produced for this exact position.
    pub fn make(&mut self, mv: &Move) {
        self.history.push(Undo {
            occ_squares: self.occ_squares,
            occ_by_color: self.occ_by_color,
            occ_by_piece: self.occ_by_piece,
            turn: self.turn,
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            halfmove_clock: self.halfmove_clock,
            move_num: self.move_num,
        });

        let mover = self.turn;
        let orig = mv.origin();
        let dest = mv.destination();

        // the en-passant window lasts exactly one ply; re-opened below on double pushes
        self.ep_square = None;

        // lift the mover off its origin
        self.occ_by_piece[mover as usize][mv.piece() as usize].remove(orig);

        // clear the captured piece, which for en passant is not on the destination square
        if mv.is_en_passant() {
            let victim = match mover {
                White => Square::try_from(dest as usize - 8).expect("INFALLIBLE"),
                Black => Square::try_from(dest as usize + 8).expect("INFALLIBLE"),
            };
            self.occ_by_piece[!mover as usize][Pawn as usize].remove(victim);
        } else if mv.is_capture() {
            if let Some((color, piece)) = self.piece_at(dest) {
                self.occ_by_piece[color as usize][piece as usize].remove(dest);
            }
        }

        // drop the mover, or what it promotes to, on the destination
        match mv.kind() {
            MoveKind::Promotion(piece) => {
                self.occ_by_piece[mover as usize][piece as usize].insert(dest);
            },
            _ => {
                self.occ_by_piece[mover as usize][mv.piece() as usize].insert(dest);
            },
        }

        // move the rook for castling moves
        if mv.is_castling() {
            let (rook_orig, rook_dest) = match dest {
                Square::G1 => (Square::H1, Square::F1),
                Square::C1 => (Square::A1, Square::D1),
                Square::G8 => (Square::H8, Square::F8),
                Square::C8 => (Square::A8, Square::D8),
                _ => unreachable!(),
            };
            let rooks = &mut self.occ_by_piece[mover as usize][Rook as usize];
            rooks.remove(rook_orig);
            rooks.insert(rook_dest);
        }

        // a double advancement opens the en-passant window on the square passed through
        if mv.kind() == MoveKind::Advance2 {
            self.ep_square =
                Some(Square::try_from((orig as usize + dest as usize) / 2).expect("INFALLIBLE"));
        }

        // a king move spends both of the mover's castling rights
        if mv.piece() == King {
            self.castling_rights &= match mover {
                White => !(WHITE_KING_SIDE | WHITE_QUEEN_SIDE),
                Black => !(BLACK_KING_SIDE | BLACK_QUEEN_SIDE),
            };
        }

        // any move leaving or landing on a rook home square spends the right tied to that
        // corner; the destination case also covers rooks captured at home
        for &sq in &[orig, dest] {
            match sq {
                Square::A1 => self.castling_rights &= !WHITE_QUEEN_SIDE,
                Square::H1 => self.castling_rights &= !WHITE_KING_SIDE,
                Square::A8 => self.castling_rights &= !BLACK_QUEEN_SIDE,
                Square::H8 => self.castling_rights &= !BLACK_KING_SIDE,
                _ => {},
            }
        }

        self.recompute_occupancy();

        // update move counters
        if mv.piece() == Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Black {
            self.move_num += 1;
        }

        // switch turns
        self.turn = !mover;
    }

    /// Reverses the most recent `make`, restoring the exact prior state.
    pub fn unmake(&mut self) -> Result<()> {
        let undo = self.history.pop().ok_or(Error::NoHistory)?;

        self.occ_squares = undo.occ_squares;
        self.occ_by_color = undo.occ_by_color;
        self.occ_by_piece = undo.occ_by_piece;
        self.turn = undo.turn;
        self.castling_rights = undo.castling_rights;
        self.ep_square = undo.ep_square;
        self.halfmove_clock = undo.halfmove_clock;
        self.move_num = undo.move_num;

        Ok(())
    }

    /// Returns `true` if `sq` is attacked by a piece of color `c`.
    pub fn square_attacked_by(&self, sq: Square, c: Color) -> bool {
        // a pawn of color `c` attacks `sq` iff it stands on a square which a pawn of the
        // opposite color would attack from `sq`
        if pawn_attacks(!c, sq).intersects(self.occupied_by_piece(c, Pawn)) {
            return true;
        }
        if knight_attacks(sq).intersects(self.occupied_by_piece(c, Knight)) {
            return true;
        }
        if king_attacks(sq).intersects(self.occupied_by_piece(c, King)) {
            return true;
        }

        let queens = self.occupied_by_piece(c, Queen);
        bishop_attacks(sq, self.occ_squares)
            .intersects(self.occupied_by_piece(c, Bishop) | queens)
            || rook_attacks(sq, self.occ_squares)
                .intersects(self.occupied_by_piece(c, Rook) | queens)
    }

    /// Recomputes the per-color and overall occupancy from the piece bitboards.
    fn recompute_occupancy(&mut self) {
        for &c in &[White, Black] {
            let mut occ = Bitboard::new();
            for board in &self.occ_by_piece[c as usize] {
                occ |= *board;
            }
            self.occ_by_color[c as usize] = occ;
        }

        self.occ_squares = self.occ_by_color[White as usize] | self.occ_by_color[Black as usize];
    }
}

impl Default for Position {
    /// Returns the standard starting Position.
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl fmt::Debug for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string.
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}
