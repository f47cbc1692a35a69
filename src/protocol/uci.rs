//! The engine side of the Universal Chess Interface
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::stdin;
use std::io::BufRead;
use log::{error, info};
use chess::{Color, Move, MoveGenerator, MoveKind, Piece, Position, Square};
use chess::perft;
use super::ParseMoveError;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A UCI session. Owns the current position and drives the move generator on behalf of the
/// client. All traffic in both directions is logged using the log crate (assuming a logger is
/// set up).
#[derive(Debug)]
pub struct Uci {
    pos: Position,
    gen: MoveGenerator,
}

/// Returns `true` if a king move from `orig` to `dest` is one of the four castling
/// encodings used by the coordinate move format.
fn is_castle(us: Color, orig: Square, dest: Square) -> bool {
    match us {
        Color::White => orig == Square::E1 && (dest == Square::G1 || dest == Square::C1),
        Color::Black => orig == Square::E8 && (dest == Square::G8 || dest == Square::C8),
    }
}

impl Uci {
    /// Creates a new session holding the standard starting position.
    pub fn new() -> Uci {
        Uci {
            pos: Position::new(),
            gen: MoveGenerator::new(),
        }
    }

    /// Runs the command loop until `quit` or end of input.
    pub fn run(&mut self) {
        let stdin = stdin();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line.trim().to_string(),
                Err(_) => break,
            };
            if line.is_empty() {
                continue;
            }

            info!("<client>: {}", line);
            if self.handle_line(&line) {
                break;
            }
        }
    }

    /// Sends a message to the client.
    fn send(s: &str) {
        println!("{}", s);
        info!("<engine>: {}", s);
    }

    /// Handles a single command line. Returns `true` when the engine should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        let mut tokens = line.split_whitespace();
        let cmd = match tokens.next() {
            Some(cmd) => cmd,
            None => return false,
        };
        let rest: Vec<&str> = tokens.collect();

        match cmd {
            "uci" => {
                Self::send(&format!("id name Castellan {}", env!("CARGO_PKG_VERSION")));
                Self::send("id author The Castellan developers");
                Self::send("uciok");
            },
            "isready" => Self::send("readyok"),
            "ucinewgame" => self.pos = Position::new(),
            "position" => self.handle_position(&rest),
            "go" => self.handle_go(&rest),
            "perft" => self.handle_perft(&rest),
            // no search is ever in flight, so there is nothing to stop
            "stop" => {},
            "quit" => return true,
            _ => info!("ignoring unknown command: {}", cmd),
        }

        false
    }

    /// `position [startpos | fen <fen>] [moves <move>...]`
    fn handle_position(&mut self, tokens: &[&str]) {
        let moves_at = tokens.iter().position(|&t| t == "moves");
        let setup = &tokens[..moves_at.unwrap_or_else(|| tokens.len())];

        match setup.first() {
            Some(&"startpos") => self.pos = Position::new(),
            Some(&"fen") => {
                let fen = setup[1..].join(" ");
                if let Err(err) = self.pos.set_from_fen(&fen) {
                    error!("{}: {}", fen, err);
                    return;
                }
            },
            _ => {
                error!("position: expected startpos or fen");
                return;
            },
        }

        if let Some(at) = moves_at {
            for token in &tokens[at + 1..] {
                match self.parse_move(token) {
                    Ok(mv) => self.pos.make(&mv),
                    Err(err) => {
                        error!("{}: {}", token, err);
                        return;
                    },
                }
            }
        }
    }

    /// `go [perft <depth>]`
    fn handle_go(&mut self, tokens: &[&str]) {
        if tokens.first() == Some(&"perft") {
            self.handle_perft(&tokens[1..]);
            return;
        }

        // there is no search in this engine; answer with the first legal move so that
        // clients waiting on a bestmove can proceed
        match self.gen.generate_legal(&mut self.pos).first() {
            Some(mv) => Self::send(&format!("bestmove {}", mv)),
            None => Self::send("bestmove 0000"),
        }
    }

    /// `perft <depth> [fen <fen>]`
    fn handle_perft(&mut self, tokens: &[&str]) {
        let depth = match tokens.first().map(|d| d.parse::<usize>()) {
            Some(Ok(depth)) => depth,
            _ => {
                error!("perft: expected a depth");
                return;
            },
        };

        let mut pos = if tokens.get(1) == Some(&"fen") {
            let fen = tokens[2..].join(" ");
            match fen.parse::<Position>() {
                Ok(pos) => pos,
                Err(err) => {
                    error!("{}: {}", fen, err);
                    return;
                },
            }
        } else {
            self.pos.clone()
        };

        Self::send(&format!("nodes {}", perft::count(&mut pos, depth)));
    }

    /// Parses a move in coordinate notation (eg. e2e4, e7e8q, e1g1) against the current
    /// position, inferring the special move kinds the coordinate form leaves implicit.
    fn parse_move(&self, s: &str) -> Result<Move, ParseMoveError> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(ParseMoveError::BadSquare);
        }

        let orig = s[0..2].parse::<Square>().map_err(|_| ParseMoveError::BadSquare)?;
        let dest = s[2..4].parse::<Square>().map_err(|_| ParseMoveError::BadSquare)?;

        let promotion = match &s[4..] {
            "" => None,
            "q" => Some(Piece::Queen),
            "r" => Some(Piece::Rook),
            "b" => Some(Piece::Bishop),
            "n" => Some(Piece::Knight),
            _ => return Err(ParseMoveError::BadPromotion),
        };

        let us = self.pos.turn();
        let piece = match self.pos.piece_at(orig) {
            Some((color, piece)) if color == us => piece,
            _ => return Err(ParseMoveError::NoPiece),
        };

        let kind = if let Some(promoted_to) = promotion {
            MoveKind::Promotion(promoted_to)
        } else if piece == Piece::King && is_castle(us, orig, dest) {
            MoveKind::Castling
        } else if piece == Piece::Pawn
            && Some(dest) == self.pos.en_passant_square()
            && orig.file() != dest.file() {
            MoveKind::EnPassant
        } else if piece == Piece::Pawn && (orig as i8 - dest as i8).abs() == 16 {
            MoveKind::Advance2
        } else {
            MoveKind::Standard
        };

        let capture = kind == MoveKind::EnPassant || self.pos.occupied_by(!us).contains(dest);

        Ok(Move::new(piece, orig, dest, capture, kind))
    }
}

impl Default for Uci {
    fn default() -> Self {
        Uci::new()
    }
}
