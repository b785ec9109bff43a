use crate::core::MoveRecord;
use serde::{Deserialize, Serialize};

/// Response of `GET /get_move`: the column the bot wants to play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BotMoveResponse {
    #[serde(rename = "move")]
    pub column: usize,
}

/// Response of `GET /simulate_game`: one full bot-vs-bot game, in order.
pub type GameLog = Vec<MoveRecord>;
