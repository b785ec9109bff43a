pub mod controller;
pub mod random;
pub mod remote;

pub use controller::BotController;
pub use random::RandomBot;
pub use remote::RemoteBot;
