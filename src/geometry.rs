// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Square-index arithmetic shared by the move generators. Sliding scans and
//! knight/king steps are bounded by a table of distances to the board edge,
//! so no generator ever has to reason about wraparound on raw indices.
use crate::types::{Direction, Square, TableIndex, DIRECTIONS};

pub fn file_of(index: usize) -> usize {
    index & 7
}

pub fn rank_of(index: usize) -> usize {
    index >> 3
}

struct EdgeTable {
    table: [[u8; 8]; 64],
}

impl EdgeTable {
    pub fn new() -> EdgeTable {
        let mut et = EdgeTable {
            table: [[0; 8]; 64],
        };

        for index in 0..64 {
            let file = file_of(index) as u8;
            let rank = rank_of(index) as u8;
            let north = 7 - rank;
            let south = rank;
            let west = file;
            let east = 7 - file;
            for &dir in DIRECTIONS.iter() {
                et.table[index][dir.as_index()] = match dir {
                    Direction::North => north,
                    Direction::South => south,
                    Direction::West => west,
                    Direction::East => east,
                    Direction::NorthWest => north.min(west),
                    Direction::SouthEast => south.min(east),
                    Direction::NorthEast => north.min(east),
                    Direction::SouthWest => south.min(west),
                };
            }
        }

        et
    }

    pub fn distance(&self, index: usize, dir: Direction) -> usize {
        self.table[index][dir.as_index()] as usize
    }
}

lazy_static! {
    static ref EDGE_TABLE: EdgeTable = EdgeTable::new();
}

/// Number of squares between `sq` and the board edge, walking in `dir`.
pub fn edge_distance(sq: Square, dir: Direction) -> usize {
    EDGE_TABLE.distance(sq.as_index(), dir)
}

/// Steps `steps` squares from `sq` in `dir`, or returns None if that walks
/// off the board.
pub fn step(sq: Square, dir: Direction, steps: usize) -> Option<Square> {
    if edge_distance(sq, dir) < steps {
        return None;
    }

    Some(sq.plus(dir.as_vector() * steps as i32))
}
