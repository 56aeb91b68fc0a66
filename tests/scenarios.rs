//! End-to-end scenarios exercising the public API together: board
//! construction, move generation, the `Game` controller, and PGN
//! ingestion.

use chess_core::board::Board;
use chess_core::game::{AutoQueenDriver, Driver, Game, MoveOutcome};
use chess_core::location::Location;
use chess_core::movegen::legal_moves;
use chess_core::mv::Move;
use chess_core::pgn::{validate, MoveParser};
use chess_core::square::{Color, Square, SquareKind};

fn loc(file: i8, rank: i8) -> Location {
    Location::new(file, rank).unwrap()
}

#[test]
fn s1_en_passant_left() {
    let board = Board::with_pieces(
        Color::White,
        None,
        &[
            (loc(0, 1), Square::new(SquareKind::Pawn, Color::White)), // a2
            (loc(1, 3), Square::new(SquareKind::Pawn, Color::Black)), // b4
            (loc(4, 0), Square::new(SquareKind::King, Color::White)),
            (loc(4, 7), Square::new(SquareKind::King, Color::Black)),
        ],
    );
    let mut game = Game::with_board(AutoQueenDriver, board);

    assert_eq!(game.move_piece(loc(0, 1), loc(0, 3)).unwrap(), MoveOutcome::Normal); // a2-a4
    assert_eq!(game.move_piece(loc(1, 3), loc(0, 2)).unwrap(), MoveOutcome::Normal); // b4xa3 e.p.

    let after = game.board();
    assert!(after[loc(0, 3)].is_empty(), "captured pawn must be removed");
    assert_eq!(after[loc(0, 2)].kind(), SquareKind::Pawn);
    assert_eq!(after[loc(0, 2)].color(), Color::Black);
}

#[test]
fn s2_checkmate_by_rook() {
    let board = Board::with_pieces(
        Color::Black,
        None,
        &[
            (loc(2, 6), Square::new(SquareKind::Rook, Color::Black)), // c7
            (loc(1, 7), Square::new(SquareKind::Rook, Color::Black)), // b8
            (loc(0, 0), Square::new(SquareKind::King, Color::White)), // a1
            (loc(0, 7), Square::new(SquareKind::King, Color::Black)),
        ],
    );
    struct Counting {
        mates: u32,
    }
    impl Driver for Counting {
        fn promote(&mut self, _g: &Game<Self>, mv: &Move) -> Square {
            Square::new(SquareKind::Queen, mv.result[mv.dest].color())
        }
        fn checkmate(&mut self, _g: &Game<Self>, _mv: &Move) {
            self.mates += 1;
        }
        fn stalemate(&mut self, _g: &Game<Self>, _mv: &Move) {}
    }
    let mut game = Game::with_board(Counting { mates: 0 }, board);
    let outcome = game.move_piece(loc(2, 6), loc(0, 6)).unwrap(); // c7-a7
    assert_eq!(outcome, MoveOutcome::Checkmate);
    assert_eq!(game.driver_mut().mates, 1);
    assert!(legal_moves(&game.board()).is_empty());
}

#[test]
fn s3_stalemate() {
    let board = Board::with_pieces(
        Color::White,
        None,
        &[
            (loc(7, 2), Square::new(SquareKind::Rook, Color::White)), // h3
            (loc(1, 7), Square::new(SquareKind::Rook, Color::White)), // b8
            (loc(0, 0), Square::new(SquareKind::King, Color::Black)), // a1
            (loc(4, 4), Square::new(SquareKind::King, Color::White)),
        ],
    );
    let mut game = Game::with_board(AutoQueenDriver, board);
    let outcome = game.move_piece(loc(7, 2), loc(7, 1)).unwrap(); // h3-h2
    assert_eq!(outcome, MoveOutcome::Stalemate);
    assert!(legal_moves(&game.board()).is_empty());
}

#[test]
fn s4_castling_through_attack_forbidden() {
    let board = Board::with_pieces(
        Color::White,
        None,
        &[
            (loc(0, 0), Square::new(SquareKind::Rook, Color::White)), // a1
            (loc(4, 0), Square::new(SquareKind::King, Color::White)), // e1
            (loc(2, 7), Square::new(SquareKind::Rook, Color::Black)), // c8
            (loc(4, 7), Square::new(SquareKind::King, Color::Black)),
        ],
    );
    let mut game = Game::with_board(AutoQueenDriver, board);
    let outcome = game.move_piece(loc(4, 0), loc(2, 0)).unwrap(); // e1-c1
    assert_eq!(outcome, MoveOutcome::Invalid);
}

#[test]
fn s5_promotion_to_queen() {
    let board = Board::with_pieces(
        Color::White,
        None,
        &[
            (loc(0, 6), Square::new(SquareKind::Pawn, Color::White)), // a7
            (loc(4, 0), Square::new(SquareKind::King, Color::White)),
            (loc(4, 7), Square::new(SquareKind::King, Color::Black)),
        ],
    );
    let mut game = Game::with_board(AutoQueenDriver, board);
    game.move_piece(loc(0, 6), loc(0, 7)).unwrap(); // a7-a8
    let after = game.board();
    assert_eq!(after[loc(0, 7)].kind(), SquareKind::Queen);
    assert_eq!(after[loc(0, 7)].color(), Color::White);
}

#[test]
fn s6_pgn_ingestion_of_a_recorded_game() {
    // Fischer-Spassky, Sveti Stefan 1992, game 29 (excerpted movetext).
    let pgn = r#"[Event "F/S Return Match"]
[Site "Belgrade, Serbia JUG"]
[Date "1992.11.04"]
[Round "29"]
[White "Fischer, Robert J."]
[Black "Spassky, Boris V."]
[Result "1/2-1/2"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 {This opening is called the Ruy Lopez.}
4. Ba4 Nf6 5. O-O Be7 6. Re1 b5 7. Bb3 d6 8. c3 O-O 9. h3 Nb8 10. d4 Nbd7
11. c4 c6 12. cxb5 axb5 13. Nc3 Bb7 14. Bg5 b4 15. Nb1 h6 16. Bh4 c5 17. dxe5
Nxe4 18. Bxe7 Qxe7 19. exd6 Qf6 20. Nbd2 Nxd6 21. Nc4 Nxc4 22. Bxc4 Nb6
23. Ne5 Rae8 24. Bxf7+ Rxf7 25. Nxf7 Rxe1+ 26. Qxe1 Kxf7 27. Qe3 Qg5 28. Qxg5
hxg5 29. b3 Ke6 30. a3 Kd6 31. axb4 cxb4 32. Ra5 Nd5 33. f3 Bc8 34. Kf2 Bf5
35. Ra7 g6 36. Ra6+ Kc5 37. Ke1 Nf4 38. g3 Nxh3 39. Kd2 Kb5 40. Rd6 Kc5 41. Ra6
Nf2 42. g4 Bd3 43. Re6 1/2-1/2"#;

    let mut parser = MoveParser::new(pgn);
    let game = parser.next_game().unwrap().unwrap();
    assert_eq!(game.len(), 85);
    assert!(validate(&game).is_ok());
}

#[test]
fn standard_start_has_twenty_legal_moves() {
    assert_eq!(legal_moves(&Board::standard()).len(), 20);
}

#[test]
fn every_legal_move_leaves_the_mover_not_in_check() {
    for mv in legal_moves(&Board::standard()) {
        let mover = match mv.result.turn() {
            Color::White => Color::Black,
            Color::Black => Color::White,
        };
        let Some(king) = mv.result.king_location(mover) else { continue };
        let opponent_reach = chess_core::movegen::threatened_mask(&mv.result);
        assert_eq!(opponent_reach & (1u64 << king.index()), 0);
    }
}
