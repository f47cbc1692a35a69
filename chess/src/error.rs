//! Defines the error types surfaced by the crate
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

/// A specialized `Result` type for operations which can fail with [`Error`](enum.Error.html).
pub type Result<T, E = Error> = std::result::Result<T, E>;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a color
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse color".fmt(f)
    }
}

impl std::error::Error for ParseColorError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParsePieceError;

impl fmt::Display for ParsePieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse chess piece".fmt(f)
    }
}

impl std::error::Error for ParsePieceError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a file
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseFileError;

impl fmt::Display for ParseFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse file".fmt(f)
    }
}

impl std::error::Error for ParseFileError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a rank
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseRankError;

impl fmt::Display for ParseRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse rank".fmt(f)
    }
}

impl std::error::Error for ParseRankError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a square
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "cannot parse square".fmt(f)
    }
}

impl std::error::Error for ParseSquareError { }

impl From<ParseFileError> for ParseSquareError {
    fn from(_: ParseFileError) -> Self {
        ParseSquareError
    }
}

impl From<ParseRankError> for ParseSquareError {
    fn from(_: ParseRankError) -> Self {
        ParseSquareError
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in converting an integer to another type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TryFromIntError;

impl fmt::Display for TryFromIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "integer out of range".fmt(f)
    }
}

impl std::error::Error for TryFromIntError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The reason a FEN string was rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four required fields are present
    FieldCount,
    /// The board field does not describe an 8x8 board
    BadBoard,
    /// The board field contains an unknown piece character
    UnknownPiece,
    /// The side-to-move field is not `w` or `b`
    BadTurn,
    /// The castling field contains characters other than `KQkq` or `-`
    BadCastling,
    /// The en-passant field is not a square or `-`
    BadSquare,
    /// The half-move clock or move number is not a non-negative integer
    BadClock,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::FieldCount => "too few fields",
            FenError::BadBoard => "cannot parse board data",
            FenError::UnknownPiece => "unknown piece character",
            FenError::BadTurn => "cannot parse side to move",
            FenError::BadCastling => "cannot parse castling flags",
            FenError::BadSquare => "cannot parse en-passant square",
            FenError::BadClock => "cannot parse move clocks",
        }.fmt(f)
    }
}

impl std::error::Error for FenError { }

impl From<ParsePieceError> for FenError {
    fn from(_: ParsePieceError) -> Self {
        FenError::UnknownPiece
    }
}

impl From<ParseColorError> for FenError {
    fn from(_: ParseColorError) -> Self {
        FenError::BadTurn
    }
}

impl From<ParseSquareError> for FenError {
    fn from(_: ParseSquareError) -> Self {
        FenError::BadSquare
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error returned by the position and move generation core
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// A FEN string was malformed; the position is left untouched
    BadFen(FenError),
    /// `unmake` was called on a position with no move history
    NoHistory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadFen(reason) => write!(f, "bad fen: {}", reason),
            Error::NoHistory => "no move to unmake".fmt(f),
        }
    }
}

impl std::error::Error for Error { }

impl From<FenError> for Error {
    fn from(err: FenError) -> Self {
        Error::BadFen(err)
    }
}
