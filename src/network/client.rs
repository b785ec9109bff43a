use super::protocol::{BotMoveResponse, GameLog};
use crate::core::{Grid, PlayerId};
use anyhow::Context;
use std::time::Duration;

pub const DEFAULT_SERVER: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the external bot service. Failures are returned to the
/// caller as "no move produced"; the session decides what to do next, the
/// client never retries on its own.
#[derive(Debug, Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
}

impl BotClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(BotClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Asks the service for `player`'s next column given the current board.
    pub async fn get_move(&self, player: PlayerId, grid: &Grid) -> anyhow::Result<usize> {
        let board = serde_json::to_string(&grid.flatten())?;
        let response = self
            .http
            .get(format!("{}/get_move", self.base_url))
            .query(&[
                ("player", player.mark().to_string()),
                ("board", board),
            ])
            .send()
            .await
            .context("bot service unreachable")?
            .error_for_status()
            .context("bot service rejected the request")?;

        let parsed: BotMoveResponse = response
            .json()
            .await
            .context("bot service returned no usable move")?;
        Ok(parsed.column)
    }

    /// Fetches a complete pre-computed bot-vs-bot game.
    pub async fn simulate_game(&self) -> anyhow::Result<GameLog> {
        let response = self
            .http
            .get(format!("{}/simulate_game", self.base_url))
            .send()
            .await
            .context("simulation service unreachable")?
            .error_for_status()
            .context("simulation service rejected the request")?;

        let log: GameLog = response
            .json()
            .await
            .context("simulation service returned an unreadable log")?;
        Ok(log)
    }
}
