//! Contains the legal move generator
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use super::*;
use bitboard::*;
use Color::*;
use Piece::*;

const PROMOTION_PIECES: [Piece; 4] = [Queen, Rook, Bishop, Knight];

/// Returns the square `delta` board indices away from `sq`, if it exists.
///
/// Only meaningful for vertical deltas, which cannot wrap between files.
fn shifted(sq: Square, delta: i8) -> Option<Square> {
    let idx = sq as i8 + delta;
    if (0..Square::COUNT as i8).contains(&idx) {
        Square::try_from(idx as usize).ok()
    } else {
        None
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Generates the complete set of legal moves for a position's side to move.
///
/// Generation runs in two passes: a pseudo-legal pass per piece type collects candidates into
/// a scratch buffer owned by the generator, then a filter makes each candidate, asks whether
/// the mover's king is attacked, and unmakes. Castling is gated more strictly during the
/// first pass: the king's current square and the square it crosses are tested for enemy
/// attack, so castling out of check and through check never reach the filter, which itself
/// rejects castling into check.
///
/// The generator holds no position state, only the reusable buffer; it can serve any number
/// of positions in sequence but must not be shared across threads.
#[derive(Debug, Default)]
pub struct MoveGenerator {
    buf: Vec<Move>,
}

impl MoveGenerator {
    /// Creates a new generator with an empty scratch buffer.
    pub fn new() -> MoveGenerator {
        Default::default()
    }

    /// Returns every legal move for `pos.turn()`.
    ///
    /// The position is borrowed mutably to drive the make/verify/unmake filter, but on return
    /// it is exactly the position that was passed in. The order of the returned moves is
    /// deterministic but otherwise unspecified.
    pub fn generate_legal(&mut self, pos: &mut Position) -> Vec<Move> {
        let us = pos.turn();

        self.buf.clear();
        self.pawn_moves(pos, us);
        self.knight_moves(pos, us);
        self.sliding_moves(pos, us, Bishop);
        self.sliding_moves(pos, us, Rook);
        self.sliding_moves(pos, us, Queen);
        self.king_moves(pos, us);
        self.castling_moves(pos, us);

        let mut legal = Vec::with_capacity(self.buf.len());
        for mv in &self.buf {
            pos.make(mv);
            let safe = match pos.king_location(us) {
                Some(king) => !pos.square_attacked_by(king, !us),
                // no king to leave in check
                None => true,
            };
            pos.unmake().expect("INFALLIBLE");

            if safe {
                legal.push(*mv);
            }
        }

        legal
    }

    fn pawn_moves(&mut self, pos: &Position, us: Color) {
        let forward: i8 = match us { White => 8, Black => -8 };
        let (start_rank, promo_rank) = match us {
            White => (Rank::R2, Rank::R8),
            Black => (Rank::R7, Rank::R1),
        };
        let enemy = pos.occupied_by(!us);

        for orig in pos.occupied_by_piece(us, Pawn) {
            // single and double advancements
            if let Some(dest) = shifted(orig, forward) {
                if !pos.occupied().contains(dest) {
                    if dest.rank() == promo_rank {
                        for &piece in &PROMOTION_PIECES {
                            self.buf.push(Move::new(Pawn, orig, dest, false,
                                MoveKind::Promotion(piece)));
                        }
                    } else {
                        self.buf.push(Move::new(Pawn, orig, dest, false, MoveKind::Standard));

                        if orig.rank() == start_rank {
                            let dest = shifted(orig, 2 * forward).expect("INFALLIBLE");
                            if !pos.occupied().contains(dest) {
                                self.buf.push(Move::new(Pawn, orig, dest, false,
                                    MoveKind::Advance2));
                            }
                        }
                    }
                }
            }

            // captures, including en passant
            for dest in pawn_attacks(us, orig) {
                if enemy.contains(dest) {
                    if dest.rank() == promo_rank {
                        for &piece in &PROMOTION_PIECES {
                            self.buf.push(Move::new(Pawn, orig, dest, true,
                                MoveKind::Promotion(piece)));
                        }
                    } else {
                        self.buf.push(Move::new(Pawn, orig, dest, true, MoveKind::Standard));
                    }
                } else if pos.en_passant_square() == Some(dest) {
                    self.buf.push(Move::new(Pawn, orig, dest, true, MoveKind::EnPassant));
                }
            }
        }
    }

    fn knight_moves(&mut self, pos: &Position, us: Color) {
        let own = pos.occupied_by(us);
        let enemy = pos.occupied_by(!us);

        for orig in pos.occupied_by_piece(us, Knight) {
            for dest in knight_attacks(orig) & !own {
                self.buf.push(Move::new(Knight, orig, dest, enemy.contains(dest),
                    MoveKind::Standard));
            }
        }
    }

    fn sliding_moves(&mut self, pos: &Position, us: Color, piece: Piece) {
        let own = pos.occupied_by(us);
        let enemy = pos.occupied_by(!us);

        for orig in pos.occupied_by_piece(us, piece) {
            let attacks = match piece {
                Bishop => bishop_attacks(orig, pos.occupied()),
                Rook => rook_attacks(orig, pos.occupied()),
                Queen => queen_attacks(orig, pos.occupied()),
                _ => unreachable!(),
            };

            for dest in attacks & !own {
                self.buf.push(Move::new(piece, orig, dest, enemy.contains(dest),
                    MoveKind::Standard));
            }
        }
    }

    fn king_moves(&mut self, pos: &Position, us: Color) {
        let own = pos.occupied_by(us);
        let enemy = pos.occupied_by(!us);

        for orig in pos.occupied_by_piece(us, King) {
            for dest in king_attacks(orig) & !own {
                self.buf.push(Move::new(King, orig, dest, enemy.contains(dest),
                    MoveKind::Standard));
            }
        }
    }

    fn castling_moves(&mut self, pos: &Position, us: Color) {
        if !pos.has_castling_rights(us) {
            return;
        }

        let (king, rook_ks, cross_ks, dest_ks) = match us {
            White => (Square::E1, Square::H1, Square::F1, Square::G1),
            Black => (Square::E8, Square::H8, Square::F8, Square::G8),
        };
        let (rook_qs, cross_qs, dest_qs, extra_qs) = match us {
            White => (Square::A1, Square::D1, Square::C1, Square::B1),
            Black => (Square::A8, Square::D8, Square::C8, Square::B8),
        };

        // castling out of check is never legal
        if !pos.occupied_by_piece(us, King).contains(king)
            || pos.square_attacked_by(king, !us) {
            return;
        }

        let occ = pos.occupied();
        let rooks = pos.occupied_by_piece(us, Rook);

        if pos.has_king_side_castling_rights(us)
            && rooks.contains(rook_ks)
            && !occ.contains(cross_ks)
            && !occ.contains(dest_ks)
            && !pos.square_attacked_by(cross_ks, !us) {
            self.buf.push(Move::new(King, king, dest_ks, false, MoveKind::Castling));
        }

        if pos.has_queen_side_castling_rights(us)
            && rooks.contains(rook_qs)
            && !occ.contains(cross_qs)
            && !occ.contains(dest_qs)
            && !occ.contains(extra_qs)
            && !pos.square_attacked_by(cross_qs, !us) {
            self.buf.push(Move::new(King, king, dest_qs, false, MoveKind::Castling));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    fn moves_from(fen: &str) -> Vec<Move> {
        let mut pos: Position = fen.parse().expect("valid fen");
        MoveGenerator::new().generate_legal(&mut pos)
    }

    #[test]
    fn twenty_moves_from_the_starting_position() {
        assert_eq!(moves_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").len(),
            20);
    }

    #[test]
    fn generation_does_not_mutate_the_position() {
        let mut pos: Position =
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse().expect("valid fen");
        let before = pos.clone();

        let mut gen = MoveGenerator::new();
        gen.generate_legal(&mut pos);
        assert_eq!(pos, before);

        // the scratch buffer is reusable across positions
        let mut other = Position::new();
        assert_eq!(gen.generate_legal(&mut other).len(), 20);
    }

    #[test]
    fn no_moves_when_checkmated() {
        // back-rank mate
        assert!(!moves_from("6k1/5ppp/8/8/8/8/8/3R2K1 b - - 0 1").is_empty());
        assert!(moves_from("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").is_empty());
    }

    #[test]
    fn no_moves_when_stalemated() {
        assert!(moves_from("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").is_empty());
    }

    #[test]
    fn a_pinned_piece_may_not_expose_its_king() {
        // the knight on d2 is pinned against the king by the rook on d8
        let moves = moves_from("3r2k1/8/8/8/8/8/3N4/3K4 w - - 0 1");
        assert!(moves.iter().all(|m| m.piece() != Knight));
    }

    #[test]
    fn promotions_come_in_fours() {
        let moves = moves_from("6k1/P7/8/8/8/8/8/6K1 w - - 0 1");
        let promotions: Vec<_> = moves.iter().filter(|m| m.is_promotion()).collect();
        assert_eq!(promotions.len(), 4);
        for &piece in &[Queen, Rook, Bishop, Knight] {
            assert!(promotions.iter().any(|m| m.promotion() == Some(piece)));
        }
    }

    #[test]
    fn en_passant_requires_an_open_window() {
        // window open: the capture is generated
        let moves = moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(moves.iter().any(|m| m.is_en_passant()
            && m.destination() == Square::D6));

        // same board without the window: no en passant capture exists
        let moves = moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn the_en_passant_window_closes_after_one_ply() {
        let mut pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().expect("valid fen");
        let mut gen = MoveGenerator::new();

        pos.make(&Move::new(King, Square::E1, Square::E2, false, MoveKind::Standard));
        pos.make(&Move::new(King, Square::E8, Square::E7, false, MoveKind::Standard));
        assert!(gen.generate_legal(&mut pos).iter().all(|m| !m.is_en_passant()));
    }

    mod castling {
        use super::*;

        fn castling_moves_from(fen: &str) -> Vec<Move> {
            moves_from(fen).into_iter().filter(|m| m.is_castling()).collect()
        }

        #[test]
        fn both_sides_available_when_the_path_is_clear() {
            let moves = castling_moves_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
            assert_eq!(moves.len(), 2);
            assert!(moves.iter().any(|m| m.destination() == Square::G1));
            assert!(moves.iter().any(|m| m.destination() == Square::C1));
        }

        #[test]
        fn rejected_without_the_right() {
            assert!(castling_moves_from("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").is_empty());
            let moves = castling_moves_from("r3k2r/8/8/8/8/8/8/R3K2R w Q - 0 1");
            assert_eq!(moves.len(), 1);
            assert_eq!(moves[0].destination(), Square::C1);
        }

        #[test]
        fn rejected_when_a_square_between_is_occupied() {
            // bishops on f1 and b1
            assert!(castling_moves_from("r3k2r/8/8/8/8/8/8/RB2KB1R w KQ - 0 1").is_empty());
        }

        #[test]
        fn rejected_when_in_check() {
            // black rook on e8 checks the king on e1
            assert!(castling_moves_from("4r3/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
        }

        #[test]
        fn rejected_when_castling_through_an_attacked_square() {
            // black rook on f8 covers f1
            assert!(castling_moves_from("5r2/8/8/8/8/8/8/4K2R w K - 0 1").is_empty());
            // black rook on d8 covers d1
            assert!(castling_moves_from("3r4/8/8/8/8/8/8/R3K3 w Q - 0 1").is_empty());
        }

        #[test]
        fn rejected_when_landing_on_an_attacked_square() {
            // black rook on g8 covers g1
            assert!(castling_moves_from("6r1/8/8/8/8/8/8/4K2R w K - 0 1").is_empty());
        }

        #[test]
        fn the_rook_square_being_attacked_does_not_matter_for_queen_side() {
            // b1 is attacked, but the king never crosses it
            let moves = castling_moves_from("1r6/8/8/8/8/8/8/R3K3 w Q - 0 1");
            assert_eq!(moves.len(), 1);
            assert_eq!(moves[0].destination(), Square::C1);
        }
    }
}
