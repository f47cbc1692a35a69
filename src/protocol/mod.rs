//! Supported chess protocols
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

pub mod uci;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a move received from the client
///
/// These errors never reach the core: the protocol layer reports them to the user and leaves
/// the position as it was.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// An origin or destination square is malformed
    BadSquare,
    /// There is no piece of the side to move on the origin square
    NoPiece,
    /// The promotion letter is not one of `qrbn`
    BadPromotion,
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::BadSquare => "cannot parse squares",
            ParseMoveError::NoPiece => "no piece to move on the origin square",
            ParseMoveError::BadPromotion => "invalid promotion letter",
        }.fmt(f)
    }
}

impl std::error::Error for ParseMoveError { }
