pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logic;
pub mod network;
pub mod player;
pub mod selfplay;

#[cfg(test)]
mod logic_tests;
