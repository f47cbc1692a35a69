//! Tests the move generator against the classical perft node counts
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod move_gen {
    use chess::perft;

    mod start_position {
        use super::count;
        const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        #[test]
        fn shallow_depths() {
            assert_eq!(count(FEN, 1), 20);
            assert_eq!(count(FEN, 2), 400);
            assert_eq!(count(FEN, 3), 8902);
            assert_eq!(count(FEN, 4), 197_281);
        }

        #[test]
        #[ignore]
        fn depth_5() {
            assert_eq!(count(FEN, 5), 4_865_609);
        }
    }

    mod kiwipete {
        use super::count;
        const FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

        #[test]
        fn shallow_depths() {
            assert_eq!(count(FEN, 1), 48);
            assert_eq!(count(FEN, 2), 2039);
            assert_eq!(count(FEN, 3), 97_862);
        }

        #[test]
        #[ignore]
        fn depth_4() {
            assert_eq!(count(FEN, 4), 4_085_603);
        }
    }

    mod position_3 {
        use super::count;
        const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

        #[test]
        fn shallow_depths() {
            assert_eq!(count(FEN, 1), 14);
            assert_eq!(count(FEN, 2), 191);
            assert_eq!(count(FEN, 3), 2812);
            assert_eq!(count(FEN, 4), 43_238);
        }

        #[test]
        #[ignore]
        fn depth_5() {
            assert_eq!(count(FEN, 5), 674_624);
        }
    }

    mod position_4 {
        use super::count;
        const FEN: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

        #[test]
        fn shallow_depths() {
            assert_eq!(count(FEN, 1), 6);
            assert_eq!(count(FEN, 2), 264);
            assert_eq!(count(FEN, 3), 9467);
        }

        #[test]
        #[ignore]
        fn depth_4() {
            assert_eq!(count(FEN, 4), 422_333);
        }
    }

    #[test]
    fn position_5() {
        const FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert_eq!(count(FEN, 1), 44);
        assert_eq!(count(FEN, 2), 1486);
        assert_eq!(count(FEN, 3), 62_379);
    }

    #[test]
    fn position_6() {
        const FEN: &str =
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
        assert_eq!(count(FEN, 1), 46);
        assert_eq!(count(FEN, 2), 2079);
        assert_eq!(count(FEN, 3), 89_890);
    }

    fn count(fen: &str, depth: usize) -> usize {
        let mut pos = fen.parse().unwrap();
        perft::count(&mut pos, depth)
    }
}
