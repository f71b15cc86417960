// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Algebraic move text. `move_text` renders a move the way it is written in
//! a score sheet; `parse_san` goes the other way, resolving a written move
//! against a legal move list.
use std::convert::TryFrom;

use pest::iterators::Pair;
use pest::Parser;

use crate::moves::Move;
use crate::types::{CastleSide, File, PieceKind, Rank, Square};

#[derive(Parser)]
#[grammar = "san.pest"]
struct SanParser;

/// Renders a move in standard algebraic notation. `legal_before` is the
/// legal move list of the position the move was played from; it decides how
/// much of the source square has to be spelled out. A move that stalemates
/// its opponent carries the draw result.
pub fn move_text(mov: Move, legal_before: &[Move], stalemate: bool) -> String {
    let mut text = String::new();
    match mov.castle_side() {
        Some(CastleSide::Kingside) => text.push_str("O-O"),
        Some(CastleSide::Queenside) => text.push_str("O-O-O"),
        None => {
            let kind = mov.moved_piece().kind;
            if kind == PieceKind::Pawn {
                if mov.is_capture() {
                    text.push_str(&mov.source().file().to_string());
                }
            } else {
                text.push(kind.letter());
                text.push_str(&disambiguation(mov, legal_before));
            }

            if mov.is_capture() {
                text.push('x');
            }

            text.push_str(&mov.destination().to_string());
            if let Some(promotion) = mov.promotion_piece() {
                text.push('=');
                text.push(promotion.letter());
            }
        }
    }

    if mov.is_checkmate() {
        text.push('#');
    } else if mov.is_check() {
        text.push('+');
    }

    if stalemate {
        text.push_str(" 1/2-1/2");
    }

    text
}

/// The shortest prefix of the source square that tells `mov` apart from
/// every other legal move of the same piece onto the same square: nothing,
/// the file, the rank, or both.
fn disambiguation(mov: Move, legal: &[Move]) -> String {
    let source = mov.source();
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|m| {
            m.destination() == mov.destination()
                && m.moved_piece() == mov.moved_piece()
                && m.source() != source
                && !m.is_castle()
        })
        .map(|m| m.source())
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != source.file()) {
        source.file().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != source.rank()) {
        source.rank().to_string()
    } else {
        source.to_string()
    }
}

/// Everything a written move says about the move it names.
#[derive(Debug, Default)]
struct MoveQuery {
    castle: Option<CastleSide>,
    piece: Option<PieceKind>,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    capture: bool,
    destination: Option<Square>,
    promotion: Option<PieceKind>,
}

impl MoveQuery {
    fn from_pair(pair: Pair<Rule>) -> MoveQuery {
        let mut query = MoveQuery::default();
        for token in pair.into_inner().flatten() {
            let first = token.as_str().chars().next().unwrap_or_default();
            match token.as_rule() {
                Rule::castle_short => query.castle = Some(CastleSide::Kingside),
                Rule::castle_long => query.castle = Some(CastleSide::Queenside),
                Rule::piece => query.piece = PieceKind::from_letter(first),
                Rule::origin_file => query.from_file = File::try_from(first).ok(),
                Rule::origin_rank => query.from_rank = Rank::try_from(first).ok(),
                Rule::capture => query.capture = true,
                Rule::square => query.destination = Square::try_from(token.as_str()).ok(),
                Rule::promotion_piece => query.promotion = PieceKind::from_letter(first),
                _ => {}
            }
        }

        query
    }

    fn matches(&self, mov: Move) -> bool {
        if let Some(side) = self.castle {
            return mov.castle_side() == Some(side);
        }

        if mov.is_castle()
            || mov.moved_piece().kind != self.piece.unwrap_or(PieceKind::Pawn)
            || Some(mov.destination()) != self.destination
            || mov.is_capture() != self.capture
        {
            return false;
        }

        if self.promotion.is_some() && !mov.is_promotion() {
            return false;
        }

        self.from_file.map_or(true, |f| mov.source().file() == f)
            && self.from_rank.map_or(true, |r| mov.source().rank() == r)
    }
}

/// Resolves algebraic move text against a legal move list. Returns the one
/// legal move the text names, with its promotion choice filled in, or None
/// if the text is malformed, names no legal move, or is ambiguous. Check
/// and annotation suffixes are accepted but not verified.
pub fn parse_san(text: &str, legal: &[Move]) -> Option<Move> {
    let pair = SanParser::parse(Rule::san, text)
        .ok()?
        .next()?
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::san_move)?;
    let query = MoveQuery::from_pair(pair);

    let mut candidates = legal.iter().copied().filter(|&m| query.matches(m));
    let found = candidates.next()?;
    if candidates.next().is_some() {
        return None;
    }

    Some(found.with_promotion(query.promotion.unwrap_or(PieceKind::Queen)))
}

/// Splits PGN-style movetext into its moves and optional result, dropping
/// move numbers and comments. Returns None if the text does not parse.
pub fn parse_movetext(text: &str) -> Option<(Vec<String>, Option<String>)> {
    let movetext = SanParser::parse(Rule::movetext, text).ok()?.next()?;
    let mut moves = vec![];
    let mut result = None;
    for pair in movetext.into_inner() {
        match pair.as_rule() {
            Rule::san_move => moves.push(pair.as_str().to_owned()),
            Rule::result => result = Some(pair.as_str().to_owned()),
            _ => {}
        }
    }

    Some((moves, result))
}
