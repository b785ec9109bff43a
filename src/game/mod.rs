pub mod log;
pub mod replay;
pub mod scheduler;
pub mod session;

pub use replay::{GameLogPlayer, ReplayStatus};
pub use scheduler::{Scheduler, TaskKind, Token};
pub use session::{GameSession, LogSource};

use crate::core::{Grid, PlayerId};
use crate::error::MoveError;
use crate::logic;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(PlayerId),
    Draw,
}

/// The whole game state: grid, turn, status. Terminal states reject all
/// further moves, so a finished game can never be mutated by a late event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    grid: Grid,
    current_player: PlayerId,
    status: GameStatus,
    move_count: usize,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            grid: Grid::new(),
            current_player: PlayerId::Player1,
            status: GameStatus::InProgress,
            move_count: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Validates and applies one move for `slot`, returning the landing row.
    /// Drop, win check and status update happen as one step; on any error the
    /// state is left untouched.
    pub fn apply_move(&mut self, slot: PlayerId, column: usize) -> Result<usize, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::TerminalState);
        }
        if slot != self.current_player {
            return Err(MoveError::OutOfTurn(slot));
        }

        let row = self.grid.drop(column, slot)?;
        self.move_count += 1;

        if let Some(winner) = logic::find_winner(&self.grid) {
            self.status = GameStatus::Won(winner);
        } else if self.grid.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = self.current_player.opponent();
        }
        Ok(row)
    }

    /// Back to an empty board with Player1 to move. Pending scheduled work
    /// must be cancelled by the caller before resetting.
    pub fn reset(&mut self) {
        *self = GameState::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
