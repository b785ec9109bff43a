use crate::core::{MoveRecord, COLS, ROWS};
use crate::game::{GameState, GameStatus};
use crate::player::BotController;
use anyhow::Context;

/// Plays two bots against each other and records the move log — the local
/// equivalent of the simulation service, consumed by the same replay player.
pub async fn simulate_game(
    p1: &dyn BotController,
    p2: &dyn BotController,
) -> anyhow::Result<Vec<MoveRecord>> {
    let mut state = GameState::new();
    let mut log = Vec::new();

    while state.status() == GameStatus::InProgress && log.len() < ROWS * COLS {
        let player = state.current_player();
        let bot = match player.index() {
            0 => p1,
            _ => p2,
        };

        let column = bot
            .choose_column(&state)
            .await
            .with_context(|| format!("{} produced no move", bot.name()))?;
        state
            .apply_move(player, column)
            .with_context(|| format!("{} played an illegal move", bot.name()))?;
        log.push(MoveRecord::new(player, column));
    }

    Ok(log)
}
