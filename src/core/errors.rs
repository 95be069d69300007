use crate::core::Move;

/// Level or move data that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FormatError {
    #[display("expected {expected} rows, found {found}")]
    Truncated { expected: usize, found: usize },
    #[display("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unrecognized cell {symbol:?} at row {row}, column {col}")]
    UnrecognizedCell { row: usize, col: usize, symbol: char },
    #[display("unrecognized move code {symbol:?} at offset {offset}")]
    UnrecognizedMoveCode { offset: usize, symbol: char },
    #[display("unexpected content after the last row ({rows} rows expected)")]
    TrailingContent { rows: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    #[display("malformed level data: {_0}")]
    Format(#[from] FormatError),
    #[display("a level needs exactly one player, found {players}")]
    #[from(ignore)]
    InvariantViolation { players: usize },
    #[display("move history is full ({capacity} moves)")]
    #[from(ignore)]
    CapacityExceeded { capacity: usize },
    #[display("recorded move {recorded:?} does not fit the board")]
    #[from(ignore)]
    HistoryMismatch { recorded: Move },
    #[display("i/o error: {_0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Whether the session is still usable after this error. Only a history
    /// that no longer fits the board is not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            GameError::Format(_)
            | GameError::InvariantViolation { .. }
            | GameError::CapacityExceeded { .. }
            | GameError::Io(_) => true,
            GameError::HistoryMismatch { .. } => false,
        }
    }
}
