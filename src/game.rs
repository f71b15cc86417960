// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game state machine. A `Game` wraps a `Position` together with
//! everything derived from it (the pseudo-legal and legal move lists and the
//! game's status) and with the history of the game so far. `apply_move` is
//! the only way to make a move; it rejects anything not in the current legal
//! list and re-derives the lists after every accepted move.
use std::convert::TryFrom;
use std::fmt;
use std::mem;

use crate::error::{Error, Result};
use crate::legality::{captures_king, legal_moves};
use crate::movegen::{pseudolegal_moves, MoveVec};
use crate::moves::Move;
use crate::notation;
use crate::position::Position;
use crate::types::{Color, PieceKind, Square, PROMOTION_KINDS};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
    /// The given side resigned.
    Resigned(Color),
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        match self {
            GameStatus::Active | GameStatus::Check => false,
            _ => true,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "active"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Resigned(Color::White) => write!(f, "white resigned"),
            GameStatus::Resigned(Color::Black) => write!(f, "black resigned"),
            GameStatus::Drawn => write!(f, "drawn"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    pseudolegal: MoveVec,
    legal: MoveVec,
    status: GameStatus,
    fen_history: Vec<String>,
    move_history: Vec<Move>,
    notation_history: Vec<String>,
}

//
// Construction
//

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Game {
        Game::from_position(Position::from_start_position())
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Game> {
        let pos = Position::from_fen(fen)?;
        Ok(Game::from_position(pos))
    }

    pub fn from_position(position: Position) -> Game {
        let fen = position.as_fen();
        let mut game = Game {
            position,
            pseudolegal: MoveVec::new(),
            legal: MoveVec::new(),
            status: GameStatus::Active,
            fen_history: vec![fen],
            move_history: vec![],
            notation_history: vec![],
        };
        game.refresh();
        game
    }

    /// Re-derives the move lists and the status from the current position.
    fn refresh(&mut self) {
        self.pseudolegal = pseudolegal_moves(&self.position);
        self.legal = legal_moves(&self.position, &self.pseudolegal);
        let in_check = captures_king(&self.pseudolegal, self.position.side_to_move());
        self.status = match (self.legal.is_empty(), in_check) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Check,
            (false, false) => GameStatus::Active,
        };
    }
}

//
// Accessors
//

impl Game {
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_check(&self) -> bool {
        match self.status {
            GameStatus::Check | GameStatus::Checkmate => true,
            _ => false,
        }
    }

    pub fn pseudolegal_moves(&self) -> &[Move] {
        &self.pseudolegal
    }

    /// The moves available to the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    pub fn fen(&self) -> String {
        self.position.as_fen()
    }

    /// FEN of every position in the game, starting with the initial one.
    pub fn fen_history(&self) -> &[String] {
        &self.fen_history
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// Move text for every ply, followed by a result entry if the game ended
    /// by resignation or agreement.
    pub fn notation_history(&self) -> &[String] {
        &self.notation_history
    }

    /// The result of a finished game in PGN form, or None while it is still
    /// being played.
    pub fn result(&self) -> Option<&'static str> {
        match self.status {
            GameStatus::Active | GameStatus::Check => None,
            GameStatus::Checkmate => Some(win_for(self.side_to_move().toggle())),
            GameStatus::Resigned(loser) => Some(win_for(loser.toggle())),
            GameStatus::Stalemate | GameStatus::Drawn => Some("1/2-1/2"),
        }
    }
}

fn win_for(color: Color) -> &'static str {
    match color {
        Color::White => "1-0",
        Color::Black => "0-1",
    }
}

//
// Making moves
//

impl Game {
    /// Plays a move. The move is matched against the legal move list on its
    /// source, destination and kind; for promotions the caller's promotion
    /// choice is kept. Returns the move as played, annotated with check and
    /// checkmate. On error the game is left untouched.
    pub fn apply_move(&mut self, mov: Move) -> Result<Move> {
        if self.is_terminal() {
            return Err(Error::IllegalMove(format!("{}: the game is over", mov)));
        }

        let chosen = self
            .legal
            .iter()
            .copied()
            .find(|m| m.same_ply(mov.with_promotion(m.promotion_kind())))
            .ok_or_else(|| Error::IllegalMove(mov.to_string()))?;

        if chosen.is_promotion() && !PROMOTION_KINDS.contains(&mov.promotion_kind()) {
            return Err(Error::IllegalMove(format!(
                "{}: cannot promote to {:?}",
                mov,
                mov.promotion_kind()
            )));
        }

        let chosen = chosen.with_promotion(mov.promotion_kind());
        let legal_before = mem::take(&mut self.legal);
        self.position.apply_move(chosen);
        self.refresh();

        let played = chosen.annotated(
            self.status == GameStatus::Check,
            self.status == GameStatus::Checkmate,
        );
        let text = notation::move_text(
            played,
            &legal_before,
            self.status == GameStatus::Stalemate,
        );
        debug!("{} ({}) -> {}", played, text, self.status);

        self.fen_history.push(self.position.as_fen());
        self.move_history.push(played);
        self.notation_history.push(text);
        Ok(played)
    }

    /// The side to move resigns.
    pub fn resign(&mut self) -> Result<()> {
        let loser = self.side_to_move();
        self.conclude(GameStatus::Resigned(loser))
    }

    /// Both sides agree to a draw.
    pub fn agree_draw(&mut self) -> Result<()> {
        self.conclude(GameStatus::Drawn)
    }

    fn conclude(&mut self, status: GameStatus) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::IllegalMove("the game is over".to_owned()));
        }

        self.status = status;
        self.legal.clear();
        if let Some(result) = self.result() {
            self.notation_history.push(result.to_owned());
        }

        debug!("game concluded: {}", status);
        Ok(())
    }

    /// Finds the legal move named by UCI text such as `e2e4` or `e7e8n`.
    /// A promoting move without a suffix promotes to a queen.
    pub fn move_from_uci(&self, text: &str) -> Result<Move> {
        let illegal = || Error::IllegalMove(text.to_owned());
        if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
            return Err(illegal());
        }

        let source = Square::try_from(&text[0..2]).map_err(|_| illegal())?;
        let dest = Square::try_from(&text[2..4]).map_err(|_| illegal())?;
        let promotion = match text[4..].chars().next() {
            Some(c) => PieceKind::from_letter(c).ok_or_else(illegal)?,
            None => PieceKind::Queen,
        };

        let mov = self
            .legal
            .iter()
            .copied()
            .find(|m| m.source() == source && m.destination() == dest)
            .ok_or_else(illegal)?;

        if text.len() == 5 && !mov.is_promotion() {
            return Err(illegal());
        }

        Ok(mov.with_promotion(promotion))
    }

    /// Finds the legal move named by algebraic text such as `Nbd2` or
    /// `exd8=Q+`.
    pub fn move_from_san(&self, text: &str) -> Result<Move> {
        notation::parse_san(text, &self.legal).ok_or_else(|| Error::IllegalMove(text.to_owned()))
    }

    /// Plays a move given either as UCI text or as algebraic text.
    pub fn apply_text(&mut self, text: &str) -> Result<Move> {
        let mov = self
            .move_from_uci(text)
            .or_else(|_| self.move_from_san(text))?;
        self.apply_move(mov)
    }

    /// Replays PGN-style movetext, such as `1. e4 e5 2. Nf3 Nc6 1/2-1/2`,
    /// from the given start position. A trailing result ends the game by
    /// resignation or agreement if the moves themselves did not end it.
    pub fn from_movetext(start_fen: Option<&str>, text: &str) -> Result<Game> {
        let mut game = match start_fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };

        let (moves, result) = notation::parse_movetext(text)
            .ok_or_else(|| Error::InvalidImport("malformed movetext".to_owned()))?;
        for (ply, san) in moves.iter().enumerate() {
            game.move_from_san(san)
                .and_then(|mov| game.apply_move(mov))
                .map_err(|e| Error::InvalidImport(format!("ply {}: {}", ply + 1, e)))?;
        }

        if let Some(result) = result {
            game.record_result(&result)?;
        }

        info!("imported {} plies of movetext", moves.len());
        Ok(game)
    }

    /// Applies a PGN result marker to a game. A result that matches how the
    /// game already ended is accepted as is.
    pub(crate) fn record_result(&mut self, result: &str) -> Result<()> {
        if self.is_terminal() {
            return match self.result() {
                Some(actual) if actual == result => Ok(()),
                _ => Err(Error::InvalidImport(format!(
                    "result {} does not match the final position",
                    result
                ))),
            };
        }

        match result {
            "1-0" => self.conclude(GameStatus::Resigned(Color::Black)),
            "0-1" => self.conclude(GameStatus::Resigned(Color::White)),
            "1/2-1/2" => self.conclude(GameStatus::Drawn),
            "*" => Ok(()),
            other => Err(Error::InvalidImport(format!("unknown result {}", other))),
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
