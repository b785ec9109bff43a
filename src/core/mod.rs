pub mod grid;
pub mod record;
pub mod types;

pub use grid::{Grid, COLS, ROWS};
pub use record::MoveRecord;
pub use types::{PlayerId, PlayerKind, PlayerSlot};
