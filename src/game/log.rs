use super::GameStatus;
use crate::core::MoveRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape of a finished game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub saved_at: String,
    pub result: GameStatus,
    pub moves: Vec<MoveRecord>,
}

const SAVE_DIR: &str = "games";

/// Writes the move history of a finished game to `games/` and returns the
/// path.
pub fn save_game_log(moves: &[MoveRecord], result: GameStatus) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(SAVE_DIR)?;

    let path = PathBuf::from(format!(
        "{}/game-{}.json",
        SAVE_DIR,
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let saved = SavedGame {
        saved_at: chrono::Local::now().to_rfc3339(),
        result,
        moves: moves.to_vec(),
    };
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, &saved)?;
    Ok(path)
}

/// Loads a move log for replay. Accepts either a `SavedGame` file or a bare
/// move array (the simulation service's response shape).
pub fn load_game_log(path: &Path) -> anyhow::Result<Vec<MoveRecord>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        let saved: SavedGame = serde_json::from_value(value)?;
        Ok(saved.moves)
    }
}
