use crate::core::PlayerId;

/// Reasons a candidate move is rejected. All of these are recoverable: the
/// caller leaves the game state unchanged and waits for the next input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is outside the board")]
    OutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("it is not {0}'s turn")]
    OutOfTurn(PlayerId),

    #[error("the game is already over")]
    TerminalState,
}
