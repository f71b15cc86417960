// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! FEN, a simple notation for chess positions. Positions can be created by
//! parsing FEN and FEN can be produced from particular positions.
//!
//! A FEN record is six whitespace-separated fields: piece placement, side
//! to move, castling rights, en-passant target, halfmove clock and fullmove
//! number. Parsing is all-or-nothing; a structural problem in any field
//! fails the whole parse. The two clocks are lenient and fall back to their
//! defaults when they are not numbers.
use std::convert::TryFrom;

use crate::error::FenParseError;
use crate::position::Position;
use crate::types::{CastleSide, CastleStatus, Color, Piece, Square};
use crate::types::{FILES, RANKS};

const FIELD_COUNT: usize = 6;
const DEFAULT_HALFMOVE: u32 = 0;
const DEFAULT_FULLMOVE: u32 = 1;

/// Parses a FEN record into a position.
pub fn parse(fen: &str) -> Result<Position, FenParseError> {
    fn eat_placement(pos: &mut Position, field: &str) -> Result<(), FenParseError> {
        let ranks: Vec<_> = field.split('/').collect();
        if ranks.len() != RANKS.len() {
            return Err(FenParseError::WrongRankCount(ranks.len()));
        }

        // FEN lists ranks from the eighth down to the first.
        for (&rank, text) in RANKS.iter().rev().zip(ranks) {
            let mut file = 0;
            for c in text.chars() {
                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value < 1 || value > 8 {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += value as usize;
                    if file > FILES.len() {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::from_fen(c).ok_or(FenParseError::UnknownPiece(c))?;
                if file >= FILES.len() {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                pos.set_piece(Square::of(rank, FILES[file]), Some(piece));
                file += 1;
            }

            if file != FILES.len() {
                return Err(FenParseError::FileDoesNotSumToEight);
            }
        }

        Ok(())
    }

    fn eat_side_to_move(field: &str) -> Result<Color, FenParseError> {
        match field {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(FenParseError::InvalidSideToMove),
        }
    }

    fn eat_castle_status(field: &str) -> Result<CastleStatus, FenParseError> {
        if field == "-" {
            return Ok(CastleStatus::NONE);
        }

        let mut status = CastleStatus::NONE;
        for c in field.chars() {
            let right = match c {
                'K' => CastleSide::Kingside.mask(Color::White),
                'Q' => CastleSide::Queenside.mask(Color::White),
                'k' => CastleSide::Kingside.mask(Color::Black),
                'q' => CastleSide::Queenside.mask(Color::Black),
                _ => return Err(FenParseError::InvalidCastle),
            };

            if status.contains(right) {
                return Err(FenParseError::InvalidCastle);
            }

            status |= right;
        }

        Ok(status)
    }

    fn eat_en_passant(field: &str) -> Result<Option<Square>, FenParseError> {
        if field == "-" {
            return Ok(None);
        }

        Square::try_from(field)
            .map(Some)
            .map_err(|_| FenParseError::InvalidEnPassant)
    }

    fn eat_clock(field: &str, name: &str, default: u32) -> u32 {
        match field.parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "unparsable {} clock '{}' in FEN, defaulting to {}",
                    name, field, default
                );
                default
            }
        }
    }

    let fields: Vec<_> = fen.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(FenParseError::WrongFieldCount(fields.len()));
    }

    let mut pos = Position::new();
    eat_placement(&mut pos, fields[0])?;
    pos.set_side_to_move(eat_side_to_move(fields[1])?);
    pos.set_castle_status(eat_castle_status(fields[2])?);
    pos.set_en_passant_square(eat_en_passant(fields[3])?);
    let halfmove = eat_clock(fields[4], "halfmove", DEFAULT_HALFMOVE);
    let fullmove = eat_clock(fields[5], "fullmove", DEFAULT_FULLMOVE);
    pos.set_clocks(halfmove, fullmove);
    Ok(pos)
}

/// Formats a position as a FEN record. This is the inverse of `parse`.
pub fn format(pos: &Position) -> String {
    let mut buf = String::new();
    for &rank in RANKS.iter().rev() {
        let mut empty_squares = 0;
        for &file in &FILES {
            let square = Square::of(rank, file);
            if let Some(piece) = pos.piece_at(square) {
                if empty_squares != 0 {
                    buf.push_str(&empty_squares.to_string());
                }
                buf.push(piece.to_fen());
                empty_squares = 0;
            } else {
                empty_squares += 1;
            }
        }

        if empty_squares != 0 {
            buf.push_str(&empty_squares.to_string());
        }

        if rank != RANKS[0] {
            buf.push('/');
        }
    }

    buf.push(' ');
    buf.push_str(&pos.side_to_move().to_string());
    buf.push(' ');
    let castle_len = buf.len();
    if pos.can_castle_kingside(Color::White) {
        buf.push('K');
    }
    if pos.can_castle_queenside(Color::White) {
        buf.push('Q');
    }
    if pos.can_castle_kingside(Color::Black) {
        buf.push('k');
    }
    if pos.can_castle_queenside(Color::Black) {
        buf.push('q');
    }
    if buf.len() == castle_len {
        buf.push('-');
    }
    buf.push(' ');
    match pos.en_passant_square() {
        Some(ep_square) => buf.push_str(&ep_square.to_string()),
        None => buf.push('-'),
    }
    buf.push(' ');
    buf.push_str(&pos.halfmove_clock().to_string());
    buf.push(' ');
    buf.push_str(&pos.fullmove_clock().to_string());
    buf
}
