//! Module for counting and printing the number of variations from a given position
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`
pub fn print(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut gen = MoveGenerator::new();
    let mut total = 0;

    for m in gen.generate_legal(pos) {
        pos.make(&m);
        let count = count(pos, depth - 1);
        println!("\t{:7}\t{:12}\t{}", m, count, pos);
        pos.unmake().expect("INFALLIBLE");

        total += count;
    }

    total
}

/// Count the number of variations of the given `depth` from `pos`
pub fn count(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut gen = MoveGenerator::new();
    let mut total = 0;

    for m in gen.generate_legal(pos) {
        pos.make(&m);
        total += count(pos, depth - 1);
        pos.unmake().expect("INFALLIBLE");
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_counts_one_leaf() {
        let mut pos = Position::new();
        assert_eq!(count(&mut pos, 0), 1);
    }

    #[test]
    fn counting_leaves_the_position_untouched() {
        let mut pos = Position::new();
        assert_eq!(count(&mut pos, 2), 400);
        assert_eq!(pos, Position::new());
    }
}
