use crate::game::GameState;
use crate::logic;
use crate::player::BotController;
use rand::seq::SliceRandom;

/// Offline fallback bot: uniformly random legal column.
pub struct RandomBot {
    name: String,
}

impl RandomBot {
    pub fn new(name: &str) -> Self {
        RandomBot {
            name: name.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl BotController for RandomBot {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_column(&self, state: &GameState) -> anyhow::Result<usize> {
        let columns = logic::legal_columns(state.grid());
        let mut rng = rand::thread_rng();
        columns
            .choose(&mut rng)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no open column to play"))
    }
}
