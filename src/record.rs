// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::Game;

/// A finished or in-progress game, reduced to what it takes to replay it:
/// where it started, the moves in UCI form, and how it ended up. The
/// notation and final FEN are kept so that a replay can be checked.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    #[serde(default)]
    pub notation: Vec<String>,
    pub final_fen: String,
    #[serde(default)]
    pub result: Option<String>,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidImport(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<GameRecord> {
        serde_json::from_str(text).map_err(|e| Error::InvalidImport(e.to_string()))
    }
}

impl Game {
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            start_fen: self.fen_history()[0].clone(),
            moves: self.move_history().iter().map(|m| m.to_string()).collect(),
            notation: self.notation_history().to_vec(),
            final_fen: self.fen(),
            result: self.result().map(str::to_owned),
        }
    }

    /// Rebuilds a game by replaying a record from its start position. Fails
    /// with `InvalidImport` if a move does not replay, or if the replayed
    /// game disagrees with the record's notation or final position.
    pub fn from_record(record: &GameRecord) -> Result<Game> {
        let mut game = Game::from_fen(&record.start_fen)?;
        for (ply, uci) in record.moves.iter().enumerate() {
            game.move_from_uci(uci)
                .and_then(|mov| game.apply_move(mov))
                .map_err(|e| Error::InvalidImport(format!("ply {}: {}", ply + 1, e)))?;
        }

        if let Some(ref result) = record.result {
            game.record_result(result)?;
        }

        if !record.notation.is_empty() && record.notation != game.notation_history() {
            return Err(Error::InvalidImport(
                "notation does not match the replayed moves".to_owned(),
            ));
        }

        let final_fen = game.fen();
        if final_fen != record.final_fen {
            return Err(Error::InvalidImport(format!(
                "replay ends at {}, record says {}",
                final_fen, record.final_fen
            )));
        }

        info!("imported game record of {} plies", record.moves.len());
        Ok(game)
    }
}
