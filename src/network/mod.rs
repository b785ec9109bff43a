pub mod client;
pub mod protocol;

pub use client::{BotClient, DEFAULT_SERVER};
pub use protocol::{BotMoveResponse, GameLog};
