use super::{GameState, GameStatus};
use crate::core::MoveRecord;
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStatus {
    Idle,
    Playing,
    Finished,
}

/// Plays a recorded game back one entry per scheduler tick, driving the same
/// `GameState` transitions a live game would. Replay is strictly sequential:
/// stopping discards the position, and a fresh replay starts at entry 0.
#[derive(Debug)]
pub struct GameLogPlayer {
    log: Vec<MoveRecord>,
    cursor: usize,
    status: ReplayStatus,
}

impl GameLogPlayer {
    pub fn new() -> Self {
        GameLogPlayer {
            log: Vec::new(),
            cursor: 0,
            status: ReplayStatus::Idle,
        }
    }

    pub fn status(&self) -> ReplayStatus {
        self.status
    }

    /// (entries consumed, total entries)
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.log.len())
    }

    /// The entries consumed so far.
    pub fn consumed(&self) -> &[MoveRecord] {
        &self.log[..self.cursor]
    }

    pub fn load(&mut self, log: Vec<MoveRecord>) {
        self.log = log;
        self.cursor = 0;
        self.status = if self.log.is_empty() {
            ReplayStatus::Finished
        } else {
            ReplayStatus::Playing
        };
    }

    pub fn stop(&mut self) {
        self.log.clear();
        self.cursor = 0;
        self.status = ReplayStatus::Idle;
    }

    /// Consumes one log entry and applies it with the entry's declared
    /// player (replay logs drive both slots). A malformed entry is skipped
    /// and reported in the returned note; playback finishes when the game is
    /// decided, the board is full, or the log runs out.
    pub fn step(&mut self, state: &mut GameState) -> Option<String> {
        if self.status != ReplayStatus::Playing {
            return None;
        }

        let entry = self.log[self.cursor];
        self.cursor += 1;
        let note = self.apply_entry(state, entry);

        if state.status() != GameStatus::InProgress || self.cursor >= self.log.len() {
            self.status = ReplayStatus::Finished;
        }
        note
    }

    fn apply_entry(&mut self, state: &mut GameState, entry: MoveRecord) -> Option<String> {
        let slot = match entry.slot() {
            Some(slot) => slot,
            None => return Some(format!("skipped log entry {}: bad player mark", self.cursor)),
        };
        let column = match entry.column {
            Some(column) => column,
            None => return Some(format!("skipped log entry {}: no usable column", self.cursor)),
        };

        match state.apply_move(slot, column) {
            Ok(_) => None,
            // The game was already decided; finish rather than skip.
            Err(MoveError::TerminalState) => {
                self.status = ReplayStatus::Finished;
                None
            }
            Err(err) => Some(format!("skipped log entry {}: {}", self.cursor, err)),
        }
    }
}

impl Default for GameLogPlayer {
    fn default() -> Self {
        GameLogPlayer::new()
    }
}
