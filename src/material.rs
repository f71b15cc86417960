// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Material counting, for display only.
use std::fmt;

use crate::position::Position;
use crate::types::{Color, PieceKind};

pub fn piece_value(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Material {
    pub white: u32,
    pub black: u32,
}

impl Material {
    pub fn count(pos: &Position) -> Material {
        let side = |color: Color| -> u32 {
            pos.pieces(color).map(|(_, p)| piece_value(p.kind)).sum()
        };
        Material {
            white: side(Color::White),
            black: side(Color::Black),
        }
    }

    /// White's material minus Black's.
    pub fn balance(self) -> i32 {
        self.white as i32 - self.black as i32
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "white {} black {} ({:+})", self.white, self.black, self.balance())
    }
}
