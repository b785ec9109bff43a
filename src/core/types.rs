use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed player slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1, // red, moves first
    Player2, // blue
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Player1
    }
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<PlayerId> {
        match index {
            0 => Some(PlayerId::Player1),
            1 => Some(PlayerId::Player2),
            _ => None,
        }
    }

    /// Mark value used on the wire: 1 for Player1, 2 for Player2.
    pub fn mark(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    pub fn from_mark(mark: u8) -> Option<PlayerId> {
        match mark {
            1 => Some(PlayerId::Player1),
            2 => Some(PlayerId::Player2),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::Player1 => "Player 1",
            PlayerId::Player2 => "Player 2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a slot is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Bot,
}

impl Default for PlayerKind {
    fn default() -> Self {
        PlayerKind::Human
    }
}

impl PlayerKind {
    /// Validates a session parameter at the boundary. Anything other than
    /// "bot" (case-insensitive) falls back to Human.
    pub fn from_param(value: &str) -> PlayerKind {
        if value.eq_ignore_ascii_case("bot") {
            PlayerKind::Bot
        } else {
            PlayerKind::Human
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerKind::Human => f.write_str("Human"),
            PlayerKind::Bot => f.write_str("Bot"),
        }
    }
}

/// A player slot: fixed id and kind for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub id: PlayerId,
    pub kind: PlayerKind,
}

impl PlayerSlot {
    pub fn new(id: PlayerId, kind: PlayerKind) -> Self {
        PlayerSlot { id, kind }
    }
}
