use super::types::PlayerId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One entry of a recorded game, in the simulation service's wire shape:
/// `{"player": 1|2, "move": <column>}`. The service reports agent failures
/// with a non-numeric `move`, so the column is decoded leniently instead of
/// rejecting the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: u8,
    #[serde(rename = "move", deserialize_with = "lenient_column")]
    pub column: Option<usize>,
}

impl MoveRecord {
    pub fn new(player: PlayerId, column: usize) -> Self {
        MoveRecord {
            player: player.mark(),
            column: Some(column),
        }
    }

    /// The slot the entry claims to be from, if the mark value is valid.
    pub fn slot(&self) -> Option<PlayerId> {
        PlayerId::from_mark(self.player)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.column {
            Some(col) => write!(f, "player {} -> column {}", self.player, col),
            None => write!(f, "player {} -> (no column)", self.player),
        }
    }
}

fn lenient_column<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().map(|n| n as usize))
}
