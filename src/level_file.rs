//! Text formats for levels and move scripts.
//!
//! A level is `rows` lines of exactly `cols` cell symbols, each line ending in
//! `\n`. A move script is a run of move codes with no separator: `h`/`b`/`g`/`d`
//! step up/down/left/right, the uppercase form marks a push and `u` is an undo.
//! This is the only module that knows about characters.

use std::path::Path;

use crate::core::{
    Board, BoardSize, Cell, Direction, FormatError, GameError, History, Move, MoveCode,
};

pub fn cell_from_symbol(ch: char) -> Option<Cell> {
    Some(match ch {
        '#' => Cell::Wall,
        ' ' => Cell::Empty,
        '.' => Cell::Target,
        '$' => Cell::BoxOnFloor,
        '*' => Cell::BoxOnTarget,
        '@' => Cell::PlayerOnFloor,
        '+' => Cell::PlayerOnTarget,
        _ => return None,
    })
}

pub fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell::Wall => '#',
        Cell::Empty => ' ',
        Cell::Target => '.',
        Cell::BoxOnFloor => '$',
        Cell::BoxOnTarget => '*',
        Cell::PlayerOnFloor => '@',
        Cell::PlayerOnTarget => '+',
    }
}

pub fn move_code_from_symbol(ch: char) -> Option<MoveCode> {
    let direction = match ch.to_ascii_lowercase() {
        'h' => Direction::Up,
        'b' => Direction::Down,
        'g' => Direction::Left,
        'd' => Direction::Right,
        'u' if ch == 'u' => return Some(MoveCode::Undo),
        _ => return None,
    };
    Some(MoveCode::Move(Move {
        direction,
        pushed: ch.is_ascii_uppercase(),
    }))
}

pub fn move_symbol(mv: Move) -> char {
    let ch = match mv.direction {
        Direction::Up => 'h',
        Direction::Down => 'b',
        Direction::Left => 'g',
        Direction::Right => 'd',
    };
    if mv.pushed { ch.to_ascii_uppercase() } else { ch }
}

pub fn move_code_symbol(code: MoveCode) -> char {
    match code {
        MoveCode::Move(mv) => move_symbol(mv),
        MoveCode::Undo => 'u',
    }
}

pub fn parse_board(source: &str, size: BoardSize) -> Result<Board, FormatError> {
    let mut lines = source.lines();
    let mut cells = Vec::with_capacity(size.area());

    for row in 0..size.rows {
        let line = lines.next().ok_or(FormatError::Truncated {
            expected: size.rows,
            found: row,
        })?;

        let found = line.chars().count();
        if found != size.cols {
            return Err(FormatError::RowLength {
                row,
                expected: size.cols,
                found,
            });
        }
        for (col, symbol) in line.chars().enumerate() {
            let cell =
                cell_from_symbol(symbol).ok_or(FormatError::UnrecognizedCell { row, col, symbol })?;
            cells.push(cell);
        }
    }

    if lines.any(|rest| !rest.is_empty()) {
        return Err(FormatError::TrailingContent { rows: size.rows });
    }

    Ok(Board::from_cells(size, cells))
}

pub fn format_board(board: &Board) -> String {
    let mut result = String::new();
    for row in board.rows() {
        result.extend(row.iter().map(|&c| cell_symbol(c)));
        result.push('\n');
    }
    result
}

pub fn parse_moves(source: &str) -> Result<Vec<MoveCode>, FormatError> {
    source
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(offset, symbol)| {
            move_code_from_symbol(symbol)
                .ok_or(FormatError::UnrecognizedMoveCode { offset, symbol })
        })
        .collect()
}

pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves.into_iter().map(|&mv| move_symbol(mv)).collect()
}

pub fn load_board(path: &Path, size: BoardSize) -> Result<Board, GameError> {
    let text = std::fs::read_to_string(path)?;
    let board = parse_board(&text, size)?;
    log::info!("loaded level {}", path.display());
    Ok(board)
}

pub fn save_board(path: &Path, board: &Board) -> Result<(), GameError> {
    std::fs::write(path, format_board(board))?;
    log::info!("saved board to {}", path.display());
    Ok(())
}

pub fn load_moves(path: &Path) -> Result<Vec<MoveCode>, GameError> {
    let text = std::fs::read_to_string(path)?;
    let codes = parse_moves(&text)?;
    log::info!("loaded {} move codes from {}", codes.len(), path.display());
    Ok(codes)
}

pub fn save_moves(path: &Path, history: &History) -> Result<(), GameError> {
    std::fs::write(path, format_moves(history.iter()))?;
    log::info!("saved {} moves to {}", history.len(), path.display());
    Ok(())
}
