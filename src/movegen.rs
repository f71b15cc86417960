// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. Moves produced here follow the movement
//! rules of each piece but may leave the mover's own king in check; the
//! legality filter in `legality` removes those.
//!
//! Generation is color-agnostic: every occupied square produces moves,
//! whoever's turn it is. The one exception is castling, which is only ever
//! generated for the side to move.
use crate::geometry::{edge_distance, step};
use crate::moves::Move;
use crate::position::Position;
use crate::types::{king_home, CastleSide, Color, Direction, Piece, PieceKind, Square};
use crate::types::{CASTLE_SIDES, DIAGONALS, DIRECTIONS, ORTHOGONALS};

pub type MoveVec = Vec<Move>;

/// Knight hops as two steps in one direction followed by one step in a
/// perpendicular direction.
static KNIGHT_HOPS: [(Direction, Direction); 8] = [
    (Direction::North, Direction::East),
    (Direction::North, Direction::West),
    (Direction::South, Direction::East),
    (Direction::South, Direction::West),
    (Direction::East, Direction::North),
    (Direction::East, Direction::South),
    (Direction::West, Direction::North),
    (Direction::West, Direction::South),
];

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Appends every pseudo-legal move in the position to `moves`.
    pub fn generate_moves(&self, pos: &Position, moves: &mut MoveVec) {
        for sq in Square::all() {
            let piece = match pos.piece_at(sq) {
                Some(piece) => piece,
                None => continue,
            };

            match piece.kind {
                PieceKind::Pawn => self.generate_pawn_moves(pos, sq, piece, moves),
                PieceKind::Knight => self.generate_knight_moves(pos, sq, piece, moves),
                PieceKind::King => self.generate_king_moves(pos, sq, piece, moves),
                PieceKind::Bishop => self.generate_sliding_moves(pos, sq, piece, &DIAGONALS, moves),
                PieceKind::Rook => self.generate_sliding_moves(pos, sq, piece, &ORTHOGONALS, moves),
                PieceKind::Queen => self.generate_sliding_moves(pos, sq, piece, &DIRECTIONS, moves),
            }
        }
    }

    fn generate_pawn_moves(&self, pos: &Position, sq: Square, pawn: Piece, moves: &mut MoveVec) {
        let forward = pawn.color.forward();
        if let Some(single) = step(sq, forward, 1) {
            if pos.piece_at(single).is_none() {
                moves.push(Move::quiet(sq, single, pawn));

                // Double pushes need both squares ahead to be empty and are
                // only available from the pawn's starting rank.
                if sq.rank() == pawn.color.pawn_rank() {
                    if let Some(double) = step(sq, forward, 2) {
                        if pos.piece_at(double).is_none() {
                            moves.push(Move::quiet(sq, double, pawn));
                        }
                    }
                }
            }
        }

        for &dir in pawn_attack_directions(pawn.color).iter() {
            let target = match step(sq, dir, 1) {
                Some(target) => target,
                None => continue,
            };

            match pos.piece_at(target) {
                Some(other) if other.color != pawn.color => {
                    moves.push(Move::capture(sq, target, pawn, other));
                }
                Some(_) => {}
                None if Some(target) == pos.en_passant_square() => {
                    // The pawn being captured sits beside us, one square
                    // behind the en-passant target.
                    let victim_square = target.towards(pawn.color.toggle().forward());
                    let victim = Piece::new(PieceKind::Pawn, pawn.color.toggle());
                    if pos.piece_at(victim_square) == Some(victim) {
                        moves.push(Move::en_passant(sq, target, pawn, victim));
                    }
                }
                None => {}
            }
        }
    }

    fn generate_knight_moves(&self, pos: &Position, sq: Square, knight: Piece, moves: &mut MoveVec) {
        for &(long, short) in KNIGHT_HOPS.iter() {
            if edge_distance(sq, long) < 2 || edge_distance(sq, short) < 1 {
                continue;
            }

            let target = sq.plus(2 * long.as_vector() + short.as_vector());
            self.push_unless_friendly(pos, sq, target, knight, moves);
        }
    }

    fn generate_king_moves(&self, pos: &Position, sq: Square, king: Piece, moves: &mut MoveVec) {
        for &dir in DIRECTIONS.iter() {
            if let Some(target) = step(sq, dir, 1) {
                self.push_unless_friendly(pos, sq, target, king, moves);
            }
        }

        if king.color != pos.side_to_move() || sq != king_home(king.color) {
            return;
        }

        for &side in CASTLE_SIDES.iter() {
            if castle_path_clear(pos, king.color, side) {
                if let Some(landing) = step(sq, side.direction(), 2) {
                    moves.push(Move::castle(sq, landing, side, king));
                }
            }
        }
    }

    fn generate_sliding_moves(
        &self,
        pos: &Position,
        sq: Square,
        piece: Piece,
        directions: &[Direction],
        moves: &mut MoveVec,
    ) {
        for &dir in directions {
            let mut target = sq;
            for _ in 0..edge_distance(sq, dir) {
                target = target.towards(dir);
                match pos.piece_at(target) {
                    None => moves.push(Move::quiet(sq, target, piece)),
                    Some(other) if other.color == piece.color => break,
                    Some(other) => {
                        moves.push(Move::capture(sq, target, piece, other));
                        break;
                    }
                }
            }
        }
    }

    fn push_unless_friendly(
        &self,
        pos: &Position,
        source: Square,
        target: Square,
        piece: Piece,
        moves: &mut MoveVec,
    ) {
        match pos.piece_at(target) {
            None => moves.push(Move::quiet(source, target, piece)),
            Some(other) if other.color != piece.color => {
                moves.push(Move::capture(source, target, piece, other))
            }
            Some(_) => {}
        }
    }
}

/// Generates every pseudo-legal move in the position.
pub fn pseudolegal_moves(pos: &Position) -> MoveVec {
    let mut moves = MoveVec::with_capacity(96);
    MoveGenerator::new().generate_moves(pos, &mut moves);
    moves
}

fn pawn_attack_directions(color: Color) -> [Direction; 2] {
    match color {
        Color::White => [Direction::NorthWest, Direction::NorthEast],
        Color::Black => [Direction::SouthWest, Direction::SouthEast],
    }
}

/// Whether `color` holds the castling right on `side`, its king and rook
/// are on their home squares, and every square between them is empty.
/// Attacks on the king's path are the legality filter's business. This is
/// stricter than checking only the king's passing and landing squares: the
/// rook must be home, and on the queen side the b-file square must be empty.
fn castle_path_clear(pos: &Position, color: Color, side: CastleSide) -> bool {
    if !pos.can_castle(color, side) || !pos.king_on_home_square(color) {
        return false;
    }

    let rook = Piece::new(PieceKind::Rook, color);
    let rook_home = side.rook_home(color);
    if pos.piece_at(rook_home) != Some(rook) {
        return false;
    }

    let mut between = king_home(color).towards(side.direction());
    while between != rook_home {
        if pos.piece_at(between).is_some() {
            return false;
        }
        between = between.towards(side.direction());
    }

    true
}

#[cfg(test)]
mod tests {
    use super::{pseudolegal_moves, MoveVec};
    use crate::moves::{Move, MoveKind};
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn moves_from(moves: &MoveVec, source: Square) -> Vec<Move> {
        moves
            .iter()
            .copied()
            .filter(|m| m.source() == source)
            .collect()
    }

    fn has_move(moves: &MoveVec, source: Square, dest: Square) -> bool {
        moves
            .iter()
            .any(|m| m.source() == source && m.destination() == dest)
    }

    #[test]
    fn start_position_counts() {
        let pos = Position::from_start_position();
        let moves = pseudolegal_moves(&pos);

        // both sides get their 16 pawn moves and 4 knight moves.
        let white = moves
            .iter()
            .filter(|m| m.moved_piece().color == Color::White)
            .count();
        let black = moves.len() - white;
        assert_eq!(20, white);
        assert_eq!(20, black);
    }

    #[test]
    fn pawn_pushes() {
        let pos = Position::from_fen("8/8/8/8/8/8/4P3/8 w - - 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        assert_eq!(2, moves.len());
        assert!(has_move(&moves, Square::E2, Square::E3));
        assert!(has_move(&moves, Square::E2, Square::E4));
    }

    #[test]
    fn pawn_double_push_blocked() {
        let pos = Position::from_fen("8/8/8/8/8/4p3/4P3/8 w - - 0 1").unwrap();
        let moves = moves_from(&pseudolegal_moves(&pos), Square::E2);
        assert!(moves.is_empty());

        let pos = Position::from_fen("8/8/8/8/4p3/8/4P3/8 w - - 0 1").unwrap();
        let moves = moves_from(&pseudolegal_moves(&pos), Square::E2);
        assert_eq!(1, moves.len());
        assert_eq!(Square::E3, moves[0].destination());
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let pos = Position::from_fen("8/8/8/8/8/3p1P2/4P3/8 w - - 0 1").unwrap();
        let moves = moves_from(&pseudolegal_moves(&pos), Square::E2);
        let capture = moves.iter().find(|m| m.is_capture()).unwrap();
        assert_eq!(Square::D3, capture.destination());
        assert_eq!(
            Some(Piece::new(PieceKind::Pawn, Color::Black)),
            capture.captured_piece()
        );
        assert!(!has_move(&moves, Square::E2, Square::F3));
    }

    #[test]
    fn pawn_does_not_wrap() {
        let pos = Position::from_fen("8/8/8/8/8/p7/7P/8 w - - 0 1").unwrap();
        let moves = moves_from(&pseudolegal_moves(&pos), Square::H2);
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn en_passant_generated() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = moves_from(&pseudolegal_moves(&pos), Square::E5);
        let ep = moves.iter().find(|m| m.is_en_passant()).unwrap();
        assert_eq!(Square::D6, ep.destination());
        assert_eq!(MoveKind::EnPassant, ep.kind());
        assert_eq!(
            Some(Piece::new(PieceKind::Pawn, Color::Black)),
            ep.captured_piece()
        );
    }

    #[test]
    fn en_passant_requires_adjacent_pawn() {
        let pos = Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        assert!(moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn knight_in_corner() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/N7 w - - 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        assert_eq!(2, moves.len());
        assert!(has_move(&moves, Square::A1, Square::B3));
        assert!(has_move(&moves, Square::A1, Square::C2));
    }

    #[test]
    fn knight_in_center() {
        let pos = Position::from_fen("8/8/8/8/3N4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(8, pseudolegal_moves(&pos).len());
    }

    #[test]
    fn knight_on_edge_does_not_wrap() {
        let pos = Position::from_fen("8/8/8/8/7N/8/8/8 w - - 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        assert_eq!(4, moves.len());
        assert!(moves.iter().all(|m| m.destination().file() as usize >= 5));
    }

    #[test]
    fn rook_slides_until_blocked() {
        let pos = Position::from_fen("8/3q4/8/8/8/3R1P2/8/8 w - - 0 1").unwrap();
        let moves = moves_from(&pseudolegal_moves(&pos), Square::D3);

        // up to and including d7, down to d1, left to a3, right to e3.
        assert_eq!(4 + 2 + 3 + 1, moves.len());
        assert!(has_move(&moves, Square::D3, Square::D7));
        assert!(!has_move(&moves, Square::D3, Square::D8));
        assert!(!has_move(&moves, Square::D3, Square::F3));
        let capture = moves.iter().find(|m| m.is_capture()).unwrap();
        assert_eq!(Square::D7, capture.destination());
    }

    #[test]
    fn queen_on_empty_board() {
        let pos = Position::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(27, pseudolegal_moves(&pos).len());
    }

    #[test]
    fn castles_generated_for_side_to_move() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(2, castles.len());
        assert!(castles.iter().all(|m| m.moved_piece().color == Color::White));
        assert!(has_move(&moves, Square::E1, Square::G1));
        assert!(has_move(&moves, Square::E1, Square::C1));
    }

    #[test]
    fn castle_blocked() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn castle_requires_right() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").unwrap();
        let moves = pseudolegal_moves(&pos);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(1, castles.len());
        assert_eq!(Square::G1, castles[0].destination());
    }
}
