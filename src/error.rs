// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("expected 6 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid digit in piece placement")]
    InvalidDigit,
    #[error("rank does not sum to eight files")]
    FileDoesNotSumToEight,
    #[error("unknown piece '{0}'")]
    UnknownPiece(char),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castling rights")]
    InvalidCastle,
    #[error("invalid en-passant square")]
    InvalidEnPassant,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] FenParseError),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("invalid import: {0}")]
    InvalidImport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
