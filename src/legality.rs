// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move filtering. A pseudo-legal move is legal if, after playing it,
//! no pseudo-legal reply captures the mover's king. Every candidate is
//! played out on a single scratch `Position` that is reset from the real
//! position before each test.
use crate::geometry::step;
use crate::movegen::{pseudolegal_moves, MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, PieceKind};

/// Whether any move in `moves` captures the king of `color`.
pub(crate) fn captures_king(moves: &MoveVec, color: Color) -> bool {
    moves.iter().any(|m| match m.captured_piece() {
        Some(piece) => piece.kind == PieceKind::King && piece.color == color,
        None => false,
    })
}

/// Returns true if the king of `color` is attacked in this position.
pub fn is_in_check(pos: &Position, color: Color) -> bool {
    captures_king(&pseudolegal_moves(pos), color)
}

/// Reduces a list of pseudo-legal moves to the moves that are legal for the
/// side to move in `pos`.
pub fn legal_moves(pos: &Position, pseudolegal: &MoveVec) -> MoveVec {
    let gen = MoveGenerator::new();
    let us = pos.side_to_move();
    let in_check = captures_king(pseudolegal, us);
    let mut scratch = pos.clone();
    let mut replies = MoveVec::with_capacity(96);
    let mut legal = MoveVec::new();

    let mut leaves_king_attacked = |mov: Move, scratch: &mut Position| {
        scratch.clone_from(pos);
        scratch.apply_move(mov);
        replies.clear();
        gen.generate_moves(scratch, &mut replies);
        captures_king(&replies, us)
    };

    for &mov in pseudolegal {
        if mov.moved_piece().color != us {
            continue;
        }

        if let Some(side) = mov.castle_side() {
            if in_check {
                continue;
            }

            // The king may not pass through an attacked square. The landing
            // square is covered by the general test below.
            let passing = match step(mov.source(), side.direction(), 1) {
                Some(passing) => passing,
                None => continue,
            };

            let king_step = Move::quiet(mov.source(), passing, mov.moved_piece());
            if leaves_king_attacked(king_step, &mut scratch) {
                continue;
            }
        }

        if !leaves_king_attacked(mov, &mut scratch) {
            legal.push(mov);
        }
    }

    legal
}

/// Generates every legal move for the side to move.
pub fn generate_legal_moves(pos: &Position) -> MoveVec {
    legal_moves(pos, &pseudolegal_moves(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn legal(fen: &str) -> MoveVec {
        generate_legal_moves(&Position::from_fen(fen).unwrap())
    }

    #[test]
    fn start_position_has_twenty() {
        let pos = Position::from_start_position();
        assert_eq!(20, generate_legal_moves(&pos).len());
        assert!(!is_in_check(&pos, Color::White));
        assert!(!is_in_check(&pos, Color::Black));
    }

    #[test]
    fn check_detection() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(is_in_check(&pos, Color::White));
        assert!(!is_in_check(&pos, Color::Black));
    }

    #[test]
    fn check_from_side_not_to_move() {
        // a position with white to move can still report black in check.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
        assert!(is_in_check(&pos, Color::Black));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let moves = legal("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.source() != Square::E2));
    }

    #[test]
    fn must_escape_check() {
        let moves = legal("4k3/8/8/8/8/2N5/8/r3K3 w - - 0 1");
        let mut uci: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
        uci.sort();
        assert_eq!(vec!["c3b1", "c3d1", "e1d2", "e1e2", "e1f2"], uci);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let moves = legal("4k3/8/8/8/8/8/8/3rK3 w - - 0 1");
        assert_eq!(3, moves.len());
        assert!(moves.iter().all(|m| m.destination() != Square::D2));
        assert!(moves.iter().all(|m| m.destination() != Square::F1));
        assert!(moves
            .iter()
            .any(|m| m.destination() == Square::D1 && m.is_capture()));
    }

    #[test]
    fn only_side_to_move() {
        let moves = legal("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1");
        assert!(moves.iter().all(|m| m.moved_piece().color == Color::Black));
        assert_eq!(5, moves.len());
    }

    #[test]
    fn castle_out_of_check_is_illegal() {
        let moves = legal("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn castle_through_attack_is_illegal() {
        let moves = legal("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(1, castles.len());
        assert_eq!(Square::C1, castles[0].destination());
    }

    #[test]
    fn castle_into_attack_is_illegal() {
        let moves = legal("6rk/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(1, castles.len());
        assert_eq!(Square::C1, castles[0].destination());
    }

    #[test]
    fn en_passant_exposing_king_is_illegal() {
        let moves = legal("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn derivation_is_idempotent() {
        let pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(generate_legal_moves(&pos), generate_legal_moves(&pos));
        assert_eq!(48, generate_legal_moves(&pos).len());
    }
}
