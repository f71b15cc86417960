// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use apollo_rules::{
    CastleStatus, Color, Error, Game, GameRecord, GameStatus, Move, Position, Square,
};

fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        if let Err(e) = game.apply_text(text) {
            panic!("move {} failed: {}", text, e);
        }
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn twenty_moves_from_start() {
        let game = Game::new();
        assert_eq!(20, game.legal_moves().len());
        assert_eq!(GameStatus::Active, game.status());
    }

    #[test]
    fn legal_list_is_stable() {
        let mut game = Game::new();
        play(&mut game, &["e4", "c5", "Nf3"]);
        let again = Game::from_fen(game.fen()).unwrap();
        assert_eq!(game.legal_moves(), again.legal_moves());
    }

    #[test]
    fn history_is_append_only() {
        let mut game = Game::new();
        play(&mut game, &["d4"]);
        let first_fens = game.fen_history().to_vec();
        let first_moves = game.move_history().to_vec();
        play(&mut game, &["d5", "c4"]);
        assert_eq!(&first_fens[..], &game.fen_history()[..2]);
        assert_eq!(&first_moves[..], &game.move_history()[..1]);
        assert_eq!(4, game.fen_history().len());
        assert_eq!(vec!["d4", "d5", "c4"], game.notation_history());
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut game = Game::new();
        play(&mut game, &["e4"]);
        let fen = game.fen();
        let legal = game.legal_moves().to_vec();
        let white_pawn = game.move_history()[0].moved_piece();
        let err = game
            .apply_move(Move::quiet(Square::D2, Square::D4, white_pawn))
            .unwrap_err();
        assert!(matches!(err, Error::IllegalMove(_)));
        assert_eq!(fen, game.fen());
        assert_eq!(legal, game.legal_moves());
        assert_eq!(1, game.move_history().len());
    }

    #[test]
    fn huge_clocks_do_not_overflow() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 4294967295 4294967295").unwrap();
        play(&mut game, &["Kd8"]);
        assert_eq!("3k4/8/8/8/8/8/8/4K3 w - - 4294967295 4294967295", game.fen());
    }
}

mod endings {
    use super::*;

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        play(&mut game, &["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(GameStatus::Checkmate, game.status());
        assert!(game.legal_moves().is_empty());
        assert_eq!("Qh4#", game.notation_history().last().unwrap());
    }

    #[test]
    fn back_rank_mate() {
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mov = game.apply_text("Ra8").unwrap();
        assert!(mov.is_checkmate());
        assert_eq!(GameStatus::Checkmate, game.status());
        assert_eq!(Some("1-0"), game.result());
        assert_eq!("Ra8#", game.notation_history()[0]);
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        let game = Game::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(GameStatus::Stalemate, game.status());
        assert!(game.legal_moves().is_empty());
        assert!(!game.is_check());
    }

    #[test]
    fn stalemating_move_is_marked() {
        let mut game = Game::from_fen("7k/5K2/8/6Q1/8/8/8/8 w - - 0 1").unwrap();
        play(&mut game, &["Qg6"]);
        assert_eq!(GameStatus::Stalemate, game.status());
        assert_eq!("Qg6 1/2-1/2", game.notation_history()[0]);
        assert_eq!(Some("1/2-1/2"), game.result());
    }

    #[test]
    fn check_is_reported() {
        let mut game = Game::new();
        play(&mut game, &["e4", "f5", "Qh5+"]);
        assert_eq!(GameStatus::Check, game.status());
        assert!(game.is_check());
        assert_eq!("Qh5+", game.notation_history()[2]);
    }

    #[test]
    fn terminal_game_accepts_nothing() {
        let mut game = Game::new();
        game.resign().unwrap();
        assert!(game.apply_text("e4").is_err());
        assert_eq!(GameStatus::Resigned(Color::White), game.status());
    }
}

mod special_moves {
    use super::*;

    #[test]
    fn en_passant_target_lasts_one_move() {
        let mut game = Game::new();
        play(&mut game, &["e4"]);
        assert_eq!(Some(Square::E3), game.position().en_passant_square());
        play(&mut game, &["Nf6"]);
        assert_eq!(None, game.position().en_passant_square());
    }

    #[test]
    fn en_passant_capture() {
        let mut game = Game::new();
        play(&mut game, &["e4", "a6", "e5", "d5"]);
        let mov = game.apply_text("exd6").unwrap();
        assert!(mov.is_en_passant());
        assert_eq!(None, game.position().piece_at(Square::D5));
        assert_eq!("exd6", game.notation_history()[4]);
    }

    #[test]
    fn castling_rights_only_shrink() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mut rights = game.position().castle_status();
        for text in &["Rb1", "Rb8", "O-O", "Kd8"] {
            play(&mut game, &[text]);
            let now = game.position().castle_status();
            assert!(rights.contains(now));
            rights = now;
        }

        assert_eq!(CastleStatus::NONE, rights);
    }

    #[test]
    fn castle_moves_rook() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut game, &["O-O", "O-O-O"]);
        assert_eq!("2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2", game.fen());
        assert_eq!(vec!["O-O", "O-O-O"], game.notation_history());
    }

    #[test]
    fn underpromotion_by_uci() {
        let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let mov = game.move_from_uci("e7e8r").unwrap();
        game.apply_move(mov).unwrap();
        assert_eq!("4R3/8/8/8/8/8/k7/4K3 b - - 0 1", game.fen());
        assert_eq!("e8=R", game.notation_history()[0]);
    }
}

mod import {
    use super::*;

    #[test]
    fn movetext_round_trip_through_record() {
        let game = Game::from_movetext(
            None,
            "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 *",
        )
        .unwrap();
        let json = game.to_record().to_json().unwrap();
        let record = GameRecord::from_json(&json).unwrap();
        let replayed = Game::from_record(&record).unwrap();
        assert_eq!(game.fen(), replayed.fen());
        assert_eq!("O-O", replayed.notation_history()[8]);
    }

    #[test]
    fn bad_start_fen() {
        let err = Game::from_movetext(Some("8/8/8 w - - 0 1"), "1. e4").unwrap_err();
        assert!(matches!(err, Error::InvalidPosition(_)));
    }

    #[test]
    fn game_from_position() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let game = Game::from_position(pos);
        assert!(game.legal_moves().iter().any(|m| m.is_castle()));
    }
}
