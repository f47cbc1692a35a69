//! Provides data and functions used to compute attacks
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use lazy_static::lazy_static;
use crate::{Color, Square};
use super::Bitboard;

// offsets are (file, rank) deltas
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

lazy_static! {
    static ref KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = direct_attacks(&KNIGHT_OFFSETS);
    static ref KING_ATTACKS: [Bitboard; Square::COUNT] = direct_attacks(&KING_OFFSETS);
    static ref PAWN_ATTACKS: [[Bitboard; Square::COUNT]; Color::COUNT] = pawn_attack_tables();
}

/// Returns the square at the given file and rank coordinates.
///
/// Both coordinates must already be known to be in 0..8.
fn square(file: i8, rank: i8) -> Square {
    Square::try_from((rank as usize) * 8 + file as usize).expect("INFALLIBLE")
}

/// Builds a per-square table for a piece which moves directly to its destinations,
/// clipping offsets which fall off the board.
fn direct_attacks(offsets: &[(i8, i8); 8]) -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::new(); Square::COUNT];

    for (sq, attacks) in table.iter_mut().enumerate() {
        let file = (sq & 7) as i8;
        let rank = (sq >> 3) as i8;

        for &(df, dr) in offsets {
            let (f, r) = (file + df, rank + dr);
            if (0..8).contains(&f) && (0..8).contains(&r) {
                attacks.insert(square(f, r));
            }
        }
    }

    table
}

/// Builds the per-color, per-square pawn attack tables.
///
/// Both the file and the rank of each destination are bounds-checked, so a pawn near either
/// board edge simply attacks fewer squares and attacks can never wrap to the other side.
fn pawn_attack_tables() -> [[Bitboard; Square::COUNT]; Color::COUNT] {
    let mut table = [[Bitboard::new(); Square::COUNT]; Color::COUNT];

    for sq in 0..Square::COUNT {
        let file = (sq & 7) as i8;
        let rank = (sq >> 3) as i8;

        for &(color, forward) in &[(Color::White, 1), (Color::Black, -1)] {
            for &df in &[-1, 1] {
                let (f, r) = (file + df, rank + forward);
                if (0..8).contains(&f) && (0..8).contains(&r) {
                    table[color as usize][sq].insert(square(f, r));
                }
            }
        }
    }

    table
}

/// Walks outward from `sq` in each of the given directions, one square at a time, stopping
/// at the first occupied square (which is included in the result).
fn ray_attacks(sq: Square, occ: Bitboard, directions: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::new();
    let file = (sq as usize & 7) as i8;
    let rank = (sq as usize >> 3) as i8;

    for &(df, dr) in directions {
        let (mut f, mut r) = (file + df, rank + dr);
        while (0..8).contains(&f) && (0..8).contains(&r) {
            let dest = square(f, r);
            attacks.insert(dest);
            if occ.contains(dest) {
                break;
            }
            f += df;
            r += dr;
        }
    }

    attacks
}

/// Computes knight-like attacks to or from `sq`
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Computes king-like attacks to or from `sq`
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Computes the squares attacked by a pawn of color `c` on `sq`
#[inline]
pub fn pawn_attacks(c: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[c as usize][sq as usize]
}

/// Computes bishop-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, occ, &BISHOP_DIRECTIONS)
}

/// Computes rook-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, occ, &ROOK_DIRECTIONS)
}

/// Computes queen-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}
