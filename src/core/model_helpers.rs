use crate::core::{Board, Cell, Direction, Move};

impl Cell {
    pub fn is_target(self) -> bool {
        matches!(self, Cell::Target | Cell::BoxOnTarget | Cell::PlayerOnTarget)
    }

    pub fn has_box(self) -> bool {
        matches!(self, Cell::BoxOnFloor | Cell::BoxOnTarget)
    }

    pub fn has_player(self) -> bool {
        matches!(self, Cell::PlayerOnFloor | Cell::PlayerOnTarget)
    }

    /// Floor or target with nothing on it.
    pub fn is_walkable(self) -> bool {
        matches!(self, Cell::Empty | Cell::Target)
    }

    /// What is left behind once the occupant steps or is pushed off.
    pub fn vacated(self) -> Cell {
        match self {
            Cell::Wall => Cell::Wall,
            Cell::Empty | Cell::BoxOnFloor | Cell::PlayerOnFloor => Cell::Empty,
            Cell::Target | Cell::BoxOnTarget | Cell::PlayerOnTarget => Cell::Target,
        }
    }

    pub fn with_player(self) -> Cell {
        if self.is_target() {
            Cell::PlayerOnTarget
        } else {
            Cell::PlayerOnFloor
        }
    }

    pub fn with_box(self) -> Cell {
        if self.is_target() {
            Cell::BoxOnTarget
        } else {
            Cell::BoxOnFloor
        }
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// (row, col) delta
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Move {
    pub fn walk(direction: Direction) -> Move {
        Move {
            direction,
            pushed: false,
        }
    }

    pub fn push(direction: Direction) -> Move {
        Move {
            direction,
            pushed: true,
        }
    }
}

impl Board {
    /// Solved once no box is left standing on plain floor.
    pub fn is_won(&self) -> bool {
        !self.rows().flatten().any(|&c| c == Cell::BoxOnFloor)
    }
}
