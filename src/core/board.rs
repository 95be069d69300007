use crate::core::{BoardSize, Cell, Direction, GameError, Position};

/// Fixed-size grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl BoardSize {
    pub fn new(rows: usize, cols: usize) -> BoardSize {
        BoardSize { rows, cols }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }
}

impl Board {
    pub fn new_filled(size: BoardSize, fill: Cell) -> Board {
        Board {
            size,
            cells: vec![fill; size.area()],
        }
    }

    /// Builds a board from already decoded rows. Rows must all be `size.cols` long.
    pub fn from_cells(size: BoardSize, cells: Vec<Cell>) -> Board {
        assert_eq!(cells.len(), size.area(), "cell count must match board size");
        Board { size, cells }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn cell_at(&self, pos: Position) -> Cell {
        self[pos]
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        self[pos] = cell;
    }

    /// The neighbouring square in `dir`, or `None` off the edge of the grid.
    pub fn offset(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (di, dj) = dir.delta();
        let row = pos.row.checked_add_signed(di)?;
        let col = pos.col.checked_add_signed(dj)?;
        let next = Position { row, col };
        self.size.contains(next).then_some(next)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.cols.max(1))
    }

    pub fn positions(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = self.size.cols.max(1);
        self.cells.iter().enumerate().map(move |(idx, &c)| {
            (
                Position {
                    row: idx / cols,
                    col: idx % cols,
                },
                c,
            )
        })
    }

    pub fn find_player(&self) -> Result<Position, GameError> {
        let mut found = None;
        let mut players = 0;
        for (pos, cell) in self.positions() {
            if cell.has_player() {
                players += 1;
                found.get_or_insert(pos);
            }
        }
        match (players, found) {
            (1, Some(pos)) => Ok(pos),
            _ => Err(GameError::InvariantViolation { players }),
        }
    }

    pub fn count_boxes_off_target(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::BoxOnFloor).count()
    }

    pub fn count_targets(&self) -> usize {
        self.cells.iter().filter(|c| c.is_target()).count()
    }

    fn index_of(&self, pos: Position) -> usize {
        assert!(
            self.size.contains(pos),
            "position {:?} outside {}x{} board",
            pos,
            self.size.rows,
            self.size.cols
        );
        pos.row * self.size.cols + pos.col
    }
}

impl std::ops::Index<Position> for Board {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[self.index_of(index)]
    }
}

impl std::ops::IndexMut<Position> for Board {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let idx = self.index_of(index);
        &mut self.cells[idx]
    }
}
