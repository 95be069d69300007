use crate::core::{Board, Direction, GameError, Move, MoveOutcome, Position};

/// Tries to step the player one square in `dir`, pushing a box if one is in the
/// way. The board and `player` are only touched when the move is legal.
pub fn step(board: &mut Board, player: &mut Position, dir: Direction) -> MoveOutcome {
    let Some(next) = board.offset(*player, dir) else {
        return MoveOutcome::Blocked;
    };

    let dest = board[next];
    let pushing = dest.has_box();

    if pushing {
        let Some(beyond_pos) = board.offset(next, dir) else {
            return MoveOutcome::Blocked;
        };
        let beyond = board[beyond_pos];
        if !beyond.is_walkable() {
            return MoveOutcome::Blocked;
        }

        // Move box
        board[beyond_pos] = beyond.with_box();
        // Clear old box spot (player will step into it)
        board[next] = dest.vacated();
    } else if !dest.is_walkable() {
        return MoveOutcome::Blocked;
    }

    move_player(board, player, next);

    MoveOutcome::Moved(Move {
        direction: dir,
        pushed: pushing,
    })
}

/// Puts the board back to how it was before `mv` was applied. `player` must be
/// where `mv` left it.
pub fn revert(board: &mut Board, player: &mut Position, mv: Move) -> Result<(), GameError> {
    let back = mv.direction.opposite();

    let vacated = *player;
    let previous = board.offset(vacated, back).ok_or_else(|| mismatch_of(mv))?;
    if !board[vacated].has_player() || !board[previous].is_walkable() {
        return Err(mismatch_of(mv));
    }

    let box_pos = if mv.pushed {
        let box_pos = board
            .offset(vacated, mv.direction)
            .ok_or_else(|| mismatch_of(mv))?;
        if !board[box_pos].has_box() {
            return Err(mismatch_of(mv));
        }
        Some(box_pos)
    } else {
        None
    };

    move_player(board, player, previous);

    if let Some(box_pos) = box_pos {
        let old_box = board[box_pos];
        let restored = board[vacated];
        board[box_pos] = old_box.vacated();
        board[vacated] = restored.with_box();
    }

    Ok(())
}

fn move_player(board: &mut Board, player: &mut Position, to: Position) {
    let cur = board[*player];
    board[*player] = cur.vacated();

    let dest_now = board[to];
    board[to] = dest_now.with_player();

    *player = to;
}

fn mismatch_of(mv: Move) -> GameError {
    GameError::HistoryMismatch { recorded: mv }
}
