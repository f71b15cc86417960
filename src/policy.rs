// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move policies pick a move for the side to move out of a game's legal move
//! list. They do no searching of their own.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::game::Game;
use crate::moves::Move;

pub trait MovePolicy {
    /// Picks one of the game's legal moves, or None if there are none.
    fn choose(&mut self, game: &Game) -> Option<Move>;
}

/// Picks uniformly at random among the legal moves.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> RandomPolicy {
        RandomPolicy {
            rng: StdRng::from_entropy(),
        }
    }

    /// A policy whose choices are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> RandomPolicy {
        RandomPolicy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> RandomPolicy {
        RandomPolicy::new()
    }
}

impl MovePolicy for RandomPolicy {
    fn choose(&mut self, game: &Game) -> Option<Move> {
        game.legal_moves().choose(&mut self.rng).copied()
    }
}

/// Lets a policy play both sides until the game ends or `max_plies` moves
/// have been made. Returns the number of moves played.
pub fn play_out<P: MovePolicy>(
    game: &mut Game,
    policy: &mut P,
    max_plies: usize,
) -> Result<usize> {
    let mut plies = 0;
    while plies < max_plies {
        let mov = match policy.choose(game) {
            Some(mov) => mov,
            None => break,
        };

        game.apply_move(mov)?;
        plies += 1;
    }

    Ok(plies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_choice_is_legal() {
        let game = Game::new();
        let mut policy = RandomPolicy::with_seed(7);
        for _ in 0..10 {
            let mov = policy.choose(&game).unwrap();
            assert!(game.legal_moves().contains(&mov));
        }
    }

    #[test]
    fn seeded_policies_agree() {
        let mut first = Game::new();
        let mut second = Game::new();
        play_out(&mut first, &mut RandomPolicy::with_seed(42), 40).unwrap();
        play_out(&mut second, &mut RandomPolicy::with_seed(42), 40).unwrap();
        assert_eq!(first.fen(), second.fen());
        assert_eq!(first.notation_history(), second.notation_history());
    }

    #[test]
    fn no_choice_in_finished_game() {
        let mut game = Game::new();
        game.resign().unwrap();
        assert_eq!(None, RandomPolicy::with_seed(1).choose(&game));
        assert_eq!(0, play_out(&mut game, &mut RandomPolicy::with_seed(1), 10).unwrap());
    }
}
