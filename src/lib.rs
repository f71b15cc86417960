// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine: board state, legal move generation, check,
//! checkmate and stalemate detection, and the FEN and algebraic notations.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

mod error;
pub mod fen;
mod game;
pub mod geometry;
pub mod legality;
pub mod material;
pub mod movegen;
mod moves;
pub mod notation;
mod perft;
pub mod policy;
mod position;
mod record;
mod types;

pub use error::{Error, FenParseError, Result};
pub use game::{Game, GameStatus};
pub use legality::{generate_legal_moves, is_in_check};
pub use material::Material;
pub use movegen::{pseudolegal_moves, MoveGenerator, MoveVec};
pub use moves::{Move, MoveKind};
pub use perft::{divide, perft};
pub use policy::{MovePolicy, RandomPolicy};
pub use position::{Position, START_FEN};
pub use record::GameRecord;
pub use types::{decode_color, decode_kind, encode};
pub use types::{CastleSide, CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
pub use types::{TableIndex, PROMOTION_KINDS};
