use crate::core::PlayerId;
use crate::game::GameState;
use crate::network::BotClient;
use crate::player::BotController;

/// Bot slot backed by the HTTP bot service.
pub struct RemoteBot {
    player: PlayerId,
    name: String,
    client: BotClient,
}

impl RemoteBot {
    pub fn new(player: PlayerId, name: &str, client: BotClient) -> Self {
        RemoteBot {
            player,
            name: name.to_string(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl BotController for RemoteBot {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_column(&self, state: &GameState) -> anyhow::Result<usize> {
        self.client.get_move(self.player, state.grid()).await
    }
}
