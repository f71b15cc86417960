// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a single ply.
//!
//! A `Move` remembers everything about the board it was generated on that
//! a consumer needs later: which piece moved, which piece (if any) it took,
//! and what kind of move it was. Only the promotion choice and the
//! check/checkmate annotations are filled in after generation.
use std::fmt;

use crate::types::{CastleSide, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    KingsideCastle,
    QueensideCastle,
    EnPassant,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    kind: MoveKind,
    moved: Piece,
    captured: Option<Piece>,
    promotion: PieceKind,
    is_check: bool,
    is_checkmate: bool,
}

impl Move {
    fn new(
        source: Square,
        destination: Square,
        kind: MoveKind,
        moved: Piece,
        captured: Option<Piece>,
    ) -> Move {
        Move {
            source,
            destination,
            kind,
            moved,
            captured,
            promotion: PieceKind::Queen,
            is_check: false,
            is_checkmate: false,
        }
    }

    /// Constructs a move onto an empty square.
    pub fn quiet(source: Square, destination: Square, moved: Piece) -> Move {
        Move::new(source, destination, MoveKind::Normal, moved, None)
    }

    /// Constructs a move that takes the piece standing on the destination.
    pub fn capture(source: Square, destination: Square, moved: Piece, captured: Piece) -> Move {
        Move::new(
            source,
            destination,
            MoveKind::Capture,
            moved,
            Some(captured),
        )
    }

    /// Constructs an en-passant capture. `captured` is the pawn that is
    /// removed, which does not stand on the destination square.
    pub fn en_passant(source: Square, destination: Square, moved: Piece, captured: Piece) -> Move {
        Move::new(
            source,
            destination,
            MoveKind::EnPassant,
            moved,
            Some(captured),
        )
    }

    /// Constructs a castle, encoded by the king's start and stop squares.
    pub fn castle(source: Square, destination: Square, side: CastleSide, king: Piece) -> Move {
        let kind = match side {
            CastleSide::Kingside => MoveKind::KingsideCastle,
            CastleSide::Queenside => MoveKind::QueensideCastle,
        };
        Move::new(source, destination, kind, king, None)
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn kind(self) -> MoveKind {
        self.kind
    }

    pub fn moved_piece(self) -> Piece {
        self.moved
    }

    pub fn captured_piece(self) -> Option<Piece> {
        self.captured
    }

    pub fn is_capture(self) -> bool {
        match self.kind {
            MoveKind::Capture | MoveKind::EnPassant => true,
            _ => false,
        }
    }

    pub fn is_en_passant(self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn is_castle(self) -> bool {
        self.castle_side().is_some()
    }

    pub fn castle_side(self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::KingsideCastle => Some(CastleSide::Kingside),
            MoveKind::QueensideCastle => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Whether this move lands a pawn on its promotion rank.
    pub fn is_promotion(self) -> bool {
        self.moved.kind == PieceKind::Pawn
            && self.destination.rank() == self.moved.color.promotion_rank()
    }

    pub fn is_double_pawn_push(self) -> bool {
        if self.moved.kind != PieceKind::Pawn {
            return false;
        }

        let from = self.source as i32;
        let to = self.destination as i32;
        (from - to).abs() == 16
    }

    /// The kind a pawn becomes, if this move is a promotion.
    pub fn promotion_piece(self) -> Option<PieceKind> {
        if self.is_promotion() {
            Some(self.promotion)
        } else {
            None
        }
    }

    /// The stored promotion choice, whether or not this move promotes.
    pub fn promotion_kind(self) -> PieceKind {
        self.promotion
    }

    pub fn is_check(self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(self) -> bool {
        self.is_checkmate
    }

    /// Returns a copy of this move with the given promotion choice.
    pub fn with_promotion(mut self, kind: PieceKind) -> Move {
        self.promotion = kind;
        self
    }

    pub(crate) fn annotated(mut self, is_check: bool, is_checkmate: bool) -> Move {
        self.is_check = is_check || is_checkmate;
        self.is_checkmate = is_checkmate;
        self
    }

    /// Whether two moves describe the same ply, ignoring annotations. The
    /// promotion choice only matters for promotions.
    pub fn same_ply(self, other: Move) -> bool {
        self.source == other.source
            && self.destination == other.destination
            && self.kind == other.kind
            && self.moved == other.moved
            && (!self.is_promotion() || self.promotion == other.promotion)
    }
}

/// Moves display in UCI long algebraic form, such as `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(kind) = self.promotion_piece() {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    #[test]
    fn uci_display() {
        let mov = Move::quiet(Square::E2, Square::E4, white(PieceKind::Pawn));
        assert_eq!("e2e4", mov.to_string());

        let promo = Move::quiet(Square::E7, Square::E8, white(PieceKind::Pawn))
            .with_promotion(PieceKind::Knight);
        assert_eq!("e7e8n", promo.to_string());
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mov = Move::quiet(Square::B7, Square::B8, white(PieceKind::Pawn));
        assert!(mov.is_promotion());
        assert_eq!(Some(PieceKind::Queen), mov.promotion_piece());

        let not_promo = Move::quiet(Square::B6, Square::B7, white(PieceKind::Pawn));
        assert!(!not_promo.is_promotion());
        assert_eq!(None, not_promo.promotion_piece());
    }

    #[test]
    fn black_promotes_on_first_rank() {
        let mov = Move::quiet(
            Square::A2,
            Square::A1,
            Piece::new(PieceKind::Pawn, Color::Black),
        );
        assert!(mov.is_promotion());
    }

    #[test]
    fn en_passant_is_capture() {
        let mov = Move::en_passant(
            Square::E5,
            Square::D6,
            white(PieceKind::Pawn),
            Piece::new(PieceKind::Pawn, Color::Black),
        );
        assert!(mov.is_capture());
        assert!(mov.is_en_passant());
        assert!(!mov.is_castle());
    }

    #[test]
    fn same_ply_ignores_annotations() {
        let mov = Move::quiet(Square::G1, Square::F3, white(PieceKind::Knight));
        assert!(mov.same_ply(mov.annotated(true, false)));
        assert!(!mov.same_ply(Move::quiet(Square::G1, Square::H3, white(PieceKind::Knight))));
    }

    #[test]
    fn same_ply_compares_promotion_choice() {
        let mov = Move::quiet(Square::A7, Square::A8, white(PieceKind::Pawn));
        assert!(!mov.same_ply(mov.with_promotion(PieceKind::Rook)));
        assert!(mov.same_ply(mov.with_promotion(PieceKind::Queen)));
    }

    #[test]
    fn double_pawn_push() {
        assert!(Move::quiet(Square::D2, Square::D4, white(PieceKind::Pawn)).is_double_pawn_push());
        assert!(!Move::quiet(Square::D2, Square::D3, white(PieceKind::Pawn)).is_double_pawn_push());
        assert!(!Move::quiet(Square::D1, Square::D3, white(PieceKind::Rook)).is_double_pawn_push());
    }
}
