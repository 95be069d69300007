use crate::core::{GameError, Move, MoveCode, MoveOutcome, UndoOutcome};
use crate::session::{ActionOutcome, Session, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayMode {
    /// Play every recorded code, then judge the final board.
    RunToEnd,
    /// Stop at the first move that solves the board.
    StopOnWin,
}

/// A recorded code that the board did not play out as recorded. `actual` is
/// what the engine did instead, `None` when nothing moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptMismatch {
    pub index: usize,
    pub recorded: MoveCode,
    pub actual: Option<Move>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayStep {
    Applied {
        index: usize,
        code: MoveCode,
        outcome: ActionOutcome,
    },
    Finished(SessionState),
}

/// Feeds a recorded script into a session, one code per call to `step`.
#[derive(Clone, Debug)]
pub struct Replay {
    session: Session,
    codes: Vec<MoveCode>,
    cursor: usize,
    mismatches: Vec<ScriptMismatch>,
}

impl Replay {
    pub fn new(session: Session, codes: Vec<MoveCode>, mode: ReplayMode) -> Replay {
        let session = match mode {
            ReplayMode::RunToEnd => session.run_to_end(),
            ReplayMode::StopOnWin => session,
        };
        Replay {
            session,
            codes,
            cursor: 0,
            mismatches: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.codes.len() - self.cursor
    }

    pub fn mismatches(&self) -> &[ScriptMismatch] {
        &self.mismatches
    }

    pub fn step(&mut self) -> Result<ReplayStep, GameError> {
        if self.session.is_finished() {
            return Ok(ReplayStep::Finished(self.session.state()));
        }
        let Some(&code) = self.codes.get(self.cursor) else {
            return Ok(ReplayStep::Finished(self.session.finish_script()));
        };
        let index = self.cursor;
        self.cursor += 1;

        let outcome = match code {
            MoveCode::Move(recorded) => {
                // The board decides whether this is a push, not the recording.
                let actual = match self.session.apply_move(recorded.direction)? {
                    MoveOutcome::Moved(mv) => Some(mv),
                    MoveOutcome::Blocked => None,
                };
                if actual != Some(recorded) {
                    self.note_mismatch(index, code, actual);
                }
                actual.map_or(ActionOutcome::Blocked, ActionOutcome::Moved)
            }
            MoveCode::Undo => match self.session.undo()? {
                UndoOutcome::Undone(mv) => ActionOutcome::Undone(mv),
                UndoOutcome::NothingToUndo => {
                    self.note_mismatch(index, code, None);
                    ActionOutcome::NothingToUndo
                }
            },
        };

        if self.remaining() == 0 {
            self.session.finish_script();
        }

        Ok(ReplayStep::Applied {
            index,
            code,
            outcome,
        })
    }

    /// Stops the replay early, leaving the session `Aborted`.
    pub fn abort(&mut self) {
        self.session.quit();
    }

    /// Steps until the session reaches a terminal state.
    pub fn run(&mut self) -> Result<SessionState, GameError> {
        loop {
            if let ReplayStep::Finished(state) = self.step()? {
                return Ok(state);
            }
        }
    }

    fn note_mismatch(&mut self, index: usize, recorded: MoveCode, actual: Option<Move>) {
        log::warn!(
            "script code {} ({:?}) does not match the board, engine did {:?}",
            index,
            recorded,
            actual
        );
        self.mismatches.push(ScriptMismatch {
            index,
            recorded,
            actual,
        });
    }
}
