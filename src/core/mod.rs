mod board;
mod consts;
mod errors;
mod history;
mod model_helpers;
mod models;
mod update;

pub use board::Board;
pub use consts::*;
pub use errors::{FormatError, GameError};
pub use history::History;
pub use models::{
    BoardSize, Cell, Direction, Move, MoveCode, MoveOutcome, Position, UndoOutcome,
};
pub use update::{revert, step};
