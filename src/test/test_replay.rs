
mod test {
    use Direction::*;
    use crate::core::*;
    use crate::level_file::parse_moves;
    use crate::session::{ActionOutcome, Replay, ReplayMode, ReplayStep, ScriptMismatch, SessionState};
    use crate::test::test_util::GameTestState;

    const LEVEL: &str = r#"
######
#@$ .#
######
"#;

    fn replay(level: &str, script: &str, mode: ReplayMode) -> Replay {
        let game = GameTestState::new(level);
        Replay::new(game.session, parse_moves(script).unwrap(), mode)
    }

    fn board_text(replay: &Replay) -> String {
        GameTestState {
            session: replay.session().clone(),
        }
        .game_to_string()
    }

    #[test]
    fn recorded_solution_is_won() {
        let mut replay = replay(LEVEL, "DD", ReplayMode::RunToEnd);
        assert_eq!(replay.run().unwrap(), SessionState::Won);
        assert_eq!(replay.session().move_count(), 2);
        assert!(replay.mismatches().is_empty());
    }

    #[test]
    fn lowercase_code_still_pushes_the_box() {
        let mut replay = replay(r#"
#@$ #
"#, "d", ReplayMode::RunToEnd);

        let step = replay.step().unwrap();
        assert_eq!(
            step,
            ReplayStep::Applied {
                index: 0,
                code: MoveCode::Move(Move::walk(Right)),
                outcome: ActionOutcome::Moved(Move::push(Right)),
            }
        );
        assert_eq!(board_text(&replay), "# @$#");
        assert_eq!(
            replay.mismatches(),
            &[ScriptMismatch {
                index: 0,
                recorded: MoveCode::Move(Move::walk(Right)),
                actual: Some(Move::push(Right)),
            }]
        );
        assert_eq!(replay.session().history().last(), Some(&Move::push(Right)));
        assert_eq!(replay.run().unwrap(), SessionState::ScriptExhausted);
    }

    #[test]
    fn uppercase_code_without_a_box_just_walks() {
        let mut replay = replay(r#"
#@ $#
"#, "D", ReplayMode::RunToEnd);
        replay.run().unwrap();
        assert_eq!(board_text(&replay), "# @$#");
        assert_eq!(replay.mismatches()[0].actual, Some(Move::walk(Right)));
    }

    #[test]
    fn stop_on_win_ends_at_the_solving_move() {
        let level = r#"
######
#@$. #
######
"#;
        let mut early = replay(level, "DD", ReplayMode::StopOnWin);
        assert_eq!(early.run().unwrap(), SessionState::Won);
        assert_eq!(early.remaining(), 1);
        assert_eq!(early.session().move_count(), 1);

        let mut full = replay(level, "DD", ReplayMode::RunToEnd);
        assert_eq!(full.run().unwrap(), SessionState::ScriptExhausted);
        assert_eq!(full.remaining(), 0);
        assert_eq!(board_text(&full), "######\n#  +$#\n######");
    }

    #[test]
    fn undo_code_takes_back_the_last_move() {
        let mut replay = replay(LEVEL, "DDu", ReplayMode::RunToEnd);
        assert_eq!(replay.run().unwrap(), SessionState::ScriptExhausted);
        assert_eq!(replay.session().move_count(), 1);
        assert_eq!(board_text(&replay), "######\n# @$.#\n######");
    }

    #[test]
    fn script_with_blocked_move_and_undo_is_repaired() {
        let mut replay = replay(LEVEL, "hDuDD", ReplayMode::RunToEnd);
        assert_eq!(replay.run().unwrap(), SessionState::Won);
        assert_eq!(replay.session().move_count(), 2);
        assert_eq!(
            replay.session().history().iter().copied().collect::<Vec<_>>(),
            vec![Move::push(Right), Move::push(Right)]
        );
        assert_eq!(
            replay.mismatches(),
            &[ScriptMismatch {
                index: 0,
                recorded: MoveCode::Move(Move::walk(Up)),
                actual: None,
            }]
        );
    }

    #[test]
    fn undo_code_on_empty_history_is_reported_not_fatal() {
        let mut replay = replay(LEVEL, "uD", ReplayMode::RunToEnd);
        let first = replay.step().unwrap();
        assert!(matches!(
            first,
            ReplayStep::Applied {
                outcome: ActionOutcome::NothingToUndo,
                ..
            }
        ));
        assert_eq!(replay.mismatches().len(), 1);
        assert_eq!(replay.run().unwrap(), SessionState::ScriptExhausted);
        assert_eq!(replay.session().move_count(), 1);
    }

    #[test]
    fn empty_script_ends_straight_away() {
        let mut replay = replay(LEVEL, "", ReplayMode::RunToEnd);
        assert!(replay.is_empty());
        assert_eq!(
            replay.step().unwrap(),
            ReplayStep::Finished(SessionState::ScriptExhausted)
        );
        assert_eq!(
            replay.step().unwrap(),
            ReplayStep::Finished(SessionState::ScriptExhausted)
        );
    }

    #[test]
    fn solved_level_is_judged_at_script_end() {
        let solved = r#"
#@ *#
"#;
        let mut early = replay(solved, "d", ReplayMode::StopOnWin);
        assert_eq!(early.run().unwrap(), SessionState::Won);
        assert_eq!(early.session().move_count(), 0);

        let mut full = replay(solved, "d", ReplayMode::RunToEnd);
        assert_eq!(full.session().state(), SessionState::Loaded);
        assert_eq!(full.run().unwrap(), SessionState::Won);
        assert_eq!(full.session().move_count(), 1);
    }

    #[test]
    fn session_is_finished_right_after_last_code() {
        let mut replay = replay(LEVEL, "D", ReplayMode::RunToEnd);
        replay.step().unwrap();
        assert!(replay.session().is_finished());
        assert_eq!(replay.session().state(), SessionState::ScriptExhausted);
    }

    #[test]
    fn aborted_replay_stays_aborted() {
        let mut replay = replay(LEVEL, "DD", ReplayMode::RunToEnd);
        replay.step().unwrap();
        replay.abort();
        assert_eq!(replay.step().unwrap(), ReplayStep::Finished(SessionState::Aborted));
        assert_eq!(replay.session().move_count(), 1);
    }
}
