/// One grid square. Target-ness and occupant are folded into a single variant
/// so a cell can never claim to be two things at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    Target,
    BoxOnFloor,
    BoxOnTarget,
    PlayerOnFloor,
    PlayerOnTarget,
}

/// Row/column coordinate. Only ever built for squares inside a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A move that actually happened. Together with the player position after it,
/// this is enough to put the board back the way it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub direction: Direction,
    pub pushed: bool,
}

/// One entry of a recorded move script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveCode {
    Move(Move),
    Undo,
}

/// Result of asking the engine to step in a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Move),
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoOutcome {
    Undone(Move),
    NothingToUndo,
}
