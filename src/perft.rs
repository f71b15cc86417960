// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::legality::generate_legal_moves;
use crate::moves::Move;
use crate::position::Position;
use crate::types::PROMOTION_KINDS;

/// Counts the leaves of the legal move tree rooted at `pos`, `depth` plies
/// deep. The legal move list carries one entry per promoting pawn move, so
/// each of those is expanded into its four promotion choices here.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(pos);
    moves
        .par_iter()
        .map(|&mov| {
            expand_promotions(mov)
                .map(|choice| {
                    if depth == 1 {
                        return 1;
                    }

                    let mut new_pos = pos.clone();
                    new_pos.apply_move(choice);
                    perft(&new_pos, depth - 1)
                })
                .sum::<u64>()
        })
        .sum()
}

/// Per root move leaf counts, in the order the moves were generated.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    let moves = generate_legal_moves(pos);
    moves
        .iter()
        .flat_map(|&mov| expand_promotions(mov))
        .map(|mov| {
            let mut new_pos = pos.clone();
            new_pos.apply_move(mov);
            let count = if depth <= 1 {
                1
            } else {
                perft(&new_pos, depth - 1)
            };
            (mov, count)
        })
        .collect()
}

fn expand_promotions(mov: Move) -> impl Iterator<Item = Move> {
    let choices: &'static [_] = if mov.is_promotion() {
        &PROMOTION_KINDS
    } else {
        &PROMOTION_KINDS[3..]
    };

    choices.iter().map(move |&kind| mov.with_promotion(kind))
}
