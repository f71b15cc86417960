// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::error::FenParseError;
use crate::fen;
use crate::legality;
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{king_home, CastleSide, CastleStatus, Color, Piece, PieceKind, Square};
use crate::types::{CASTLE_SIDES, FILES, RANKS};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A bare board position: pieces, side to move, castling rights, en-passant
/// target and the two clocks. A `Position` knows how to apply a move to
/// itself but derives nothing; legal move lists, game status and history
/// live on `Game`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_clock: u32,
    side_to_move: Color,
    castle_status: CastleStatus,
}

//
// Board state getters
//

impl Position {
    pub const fn new() -> Position {
        Position {
            board: [None; 64],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
        }
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castle_status.contains(side.mask(color))
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Kingside)
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Queenside)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.as_index()]
    }

    /// The board as 64 piece codes, A1 first. Empty squares are zero.
    pub fn piece_codes(&self) -> [u8; 64] {
        let mut codes = [0; 64];
        for (code, piece) in codes.iter_mut().zip(self.board.iter()) {
            *code = piece.map_or(0, Piece::code);
        }

        codes
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        Square::all().find(|&sq| self.piece_at(sq) == Some(king))
    }

    pub fn is_check(&self, color: Color) -> bool {
        legality::is_in_check(self, color)
    }
}

//
// Position construction. These are used by the FEN parser while it builds up
// a position; after that, only `apply_move` changes a position.
//

impl Position {
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.as_index()] = piece;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castle_status(&mut self, status: CastleStatus) {
        self.castle_status = status;
    }

    pub(crate) fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.en_passant_square = square;
    }

    pub(crate) fn set_clocks(&mut self, halfmove: u32, fullmove: u32) {
        self.halfmove_clock = halfmove;
        self.fullmove_clock = fullmove;
    }
}

//
// Move application
//

impl Position {
    /// Applies a move to this position. The move must have been generated
    /// from this position; no legality checking is done here.
    pub fn apply_move(&mut self, mov: Move) {
        let moving_piece = mov.moved_piece();
        let color = moving_piece.color;

        // The captured piece is usually on the destination square, which is
        // overwritten below. En passant is the one capture where it is not.
        if mov.is_en_passant() {
            let victim = mov.destination().towards(color.toggle().forward());
            self.set_piece(victim, None);
        }

        // A capture on a rook's home square invalidates the other player's
        // castle on that side. If the rook had already left, the right is
        // already gone and this is a no-op.
        if mov.is_capture() {
            let them = color.toggle();
            for &side in CASTLE_SIDES.iter() {
                if mov.destination() == side.rook_home(them) {
                    self.castle_status &= !side.mask(them);
                }
            }
        }

        // Castles are encoded using the king's start and stop squares. The
        // rook hops to the square the king passed over.
        if let Some(side) = mov.castle_side() {
            let rook_square = side.rook_home(color);
            let new_rook_square = mov.source().towards(side.direction());
            let rook = self.piece_at(rook_square);
            self.set_piece(rook_square, None);
            self.set_piece(new_rook_square, rook);
        }

        let piece_to_add = match mov.promotion_piece() {
            Some(kind) => Piece::new(kind, color),
            None => moving_piece,
        };

        self.set_piece(mov.source(), None);
        self.set_piece(mov.destination(), Some(piece_to_add));

        // Double pawn pushes set the en-passant square; every other move
        // clears it.
        self.en_passant_square = if mov.is_double_pawn_push() {
            Some(mov.source().towards(color.forward()))
        } else {
            None
        };

        match moving_piece.kind {
            PieceKind::King => {
                self.castle_status &= !(CastleSide::Kingside.mask(color)
                    | CastleSide::Queenside.mask(color));
            }
            PieceKind::Rook => {
                for &side in CASTLE_SIDES.iter() {
                    if mov.source() == side.rook_home(color) {
                        self.castle_status &= !side.mask(color);
                    }
                }
            }
            _ => {}
        }

        if mov.is_capture() || moving_piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        self.side_to_move = color.toggle();
        if self.side_to_move == Color::White {
            self.fullmove_clock = self.fullmove_clock.saturating_add(1);
        }
    }

    /// Whether the king of `color` still stands where a castle needs it.
    pub(crate) fn king_on_home_square(&self, color: Color) -> bool {
        self.piece_at(king_home(color)) == Some(Piece::new(PieceKind::King, color))
    }
}

//
// FEN
//

impl Position {
    pub fn from_start_position() -> Position {
        fen::parse(START_FEN).expect("start position FEN is well-formed")
    }

    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(text: S) -> Result<Position, FenParseError> {
        fen::parse(text.as_ref())
    }

    pub fn as_fen(&self) -> String {
        fen::format(self)
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
