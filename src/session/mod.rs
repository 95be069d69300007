mod replay;

pub use replay::{Replay, ReplayMode, ReplayStep, ScriptMismatch};

use crate::config::GameConfig;
use crate::core::{
    revert, step, Board, Direction, GameError, History, Move, MoveOutcome, Position, UndoOutcome,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Loaded,
    Playing,
    Won,
    Aborted,
    ScriptExhausted,
}

/// One discrete input from a live player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Move(Direction),
    Undo,
    Restart,
    ZoomIn,
    ZoomOut,
    Quit,
}

/// What a `UserAction` did, for the front-end to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved(Move),
    Blocked,
    Undone(Move),
    NothingToUndo,
    Restarted,
    Zoomed(u8),
    Quit,
    Ignored,
}

/// A live game: the board, the moves that got it there, and where the game is
/// in its lifecycle.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    player: Position,
    history: History,
    move_count: usize,
    zoom: u8,
    min_zoom: u8,
    max_zoom: u8,
    state: SessionState,
    finish_on_win: bool,
}

impl Session {
    /// Starts a session that ends the moment the board is solved.
    pub fn new(board: Board, config: &GameConfig) -> Result<Session, GameError> {
        let player = board.find_player()?;
        log::info!(
            "session loaded: {}x{} board, {} boxes off target",
            board.size().rows,
            board.size().cols,
            board.count_boxes_off_target()
        );
        let mut session = Session {
            board,
            player,
            history: History::new(config.history_capacity()),
            move_count: 0,
            zoom: config.min_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            state: SessionState::Loaded,
            finish_on_win: true,
        };
        session.finish_if_solved();
        Ok(session)
    }

    /// Keep playing through a solved board; `Won` is only decided by `finish_script`.
    /// Meant to be called before any input.
    pub fn run_to_end(mut self) -> Session {
        self.finish_on_win = false;
        if self.state == SessionState::Won {
            self.state = SessionState::Loaded;
        }
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            SessionState::Won | SessionState::Aborted | SessionState::ScriptExhausted
        )
    }

    pub fn apply_move(&mut self, dir: Direction) -> Result<MoveOutcome, GameError> {
        if self.is_finished() {
            return Ok(MoveOutcome::Blocked);
        }
        self.begin();

        let outcome = step(&mut self.board, &mut self.player, dir);
        let MoveOutcome::Moved(mv) = outcome else {
            return Ok(outcome);
        };

        if let Err(err) = self.history.record(mv) {
            log::warn!("{err}; move {mv:?} taken back");
            revert(&mut self.board, &mut self.player, mv)?;
            return Err(err);
        }
        self.move_count += 1;
        log::debug!("move {}: {:?} -> {:?}", self.move_count, mv, self.player);

        self.finish_if_solved();
        Ok(outcome)
    }

    pub fn undo(&mut self) -> Result<UndoOutcome, GameError> {
        if self.is_finished() {
            return Ok(UndoOutcome::NothingToUndo);
        }
        self.begin();

        let Some(mv) = self.history.undo() else {
            return Ok(UndoOutcome::NothingToUndo);
        };
        if let Err(err) = revert(&mut self.board, &mut self.player, mv) {
            // keep history and board consistent with each other
            self.history.record(mv)?;
            return Err(err);
        }
        self.move_count = self.move_count.saturating_sub(1);
        log::debug!("undo {:?}, back at {:?}", mv, self.player);
        Ok(UndoOutcome::Undone(mv))
    }

    /// Swaps in a freshly loaded board and forgets everything played so far.
    pub fn restart(&mut self, board: Board) -> Result<(), GameError> {
        if self.is_finished() {
            return Ok(());
        }
        let player = board.find_player()?;
        self.board = board;
        self.player = player;
        self.history.clear();
        self.move_count = 0;
        self.state = SessionState::Loaded;
        log::info!("session restarted");
        self.finish_if_solved();
        Ok(())
    }

    pub fn zoom_in(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_add(1).min(self.max_zoom);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_sub(1).max(self.min_zoom);
        self.zoom
    }

    pub fn quit(&mut self) {
        if !self.is_finished() {
            self.finish(SessionState::Aborted);
        }
    }

    /// Closes a scripted session once its move source has run dry.
    pub fn finish_script(&mut self) -> SessionState {
        if !self.is_finished() {
            let end = if self.board.is_won() {
                SessionState::Won
            } else {
                SessionState::ScriptExhausted
            };
            self.finish(end);
        }
        self.state
    }

    /// Dispatches one live input. `reload` produces the board for a restart.
    pub fn handle_action<F>(&mut self, action: UserAction, reload: F) -> Result<ActionOutcome, GameError>
    where
        F: FnOnce() -> Result<Board, GameError>,
    {
        if self.is_finished() {
            return Ok(ActionOutcome::Ignored);
        }
        Ok(match action {
            UserAction::Move(dir) => match self.apply_move(dir)? {
                MoveOutcome::Moved(mv) => ActionOutcome::Moved(mv),
                MoveOutcome::Blocked => ActionOutcome::Blocked,
            },
            UserAction::Undo => match self.undo()? {
                UndoOutcome::Undone(mv) => ActionOutcome::Undone(mv),
                UndoOutcome::NothingToUndo => ActionOutcome::NothingToUndo,
            },
            UserAction::Restart => {
                self.restart(reload()?)?;
                ActionOutcome::Restarted
            }
            UserAction::ZoomIn => ActionOutcome::Zoomed(self.zoom_in()),
            UserAction::ZoomOut => ActionOutcome::Zoomed(self.zoom_out()),
            UserAction::Quit => {
                self.quit();
                ActionOutcome::Quit
            }
        })
    }

    fn begin(&mut self) {
        if self.state == SessionState::Loaded {
            self.state = SessionState::Playing;
        }
    }

    fn finish_if_solved(&mut self) {
        if self.finish_on_win && self.board.is_won() {
            self.finish(SessionState::Won);
        }
    }

    fn finish(&mut self, state: SessionState) {
        log::info!("session finished: {:?} after {} moves", state, self.move_count);
        self.state = state;
    }
}
