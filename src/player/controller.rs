use crate::game::GameState;

/// A bot slot's move source.
#[async_trait::async_trait]
pub trait BotController: Send + Sync {
    fn name(&self) -> &str;

    /// Picks a column for the current position. `Err` means "no move
    /// produced" and leaves the game state untouched.
    async fn choose_column(&self, state: &GameState) -> anyhow::Result<usize>;
}
