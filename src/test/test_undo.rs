
mod test {
    use Direction::*;
    use crate::core::*;
    use crate::test::test_util::{GameTestState, board_from};

    #[test]
    fn when_push_is_undone_board_is_restored() {
        let level = r#"
#####
#@$.#
#####
"#;
        let mut game = GameTestState::new(level).run_to_end();
        let before = game.session.board().clone();
        game.assert_move(Right);
        assert!(game.session.is_won());

        assert_eq!(game.session.undo().unwrap(), UndoOutcome::Undone(Move::push(Right)));
        game.assert_matches(level);
        assert_eq!(game.session.board(), &before);
        assert_eq!(game.session.player(), Position { row: 1, col: 1 });
        assert!(game.session.history().is_empty());
        assert_eq!(game.session.move_count(), 0);
        assert!(!game.session.is_won());
    }

    #[test]
    fn when_history_is_empty_undo_does_nothing() {
        let level = r#"
#@ $#
"#;
        let mut game = GameTestState::new(level);
        assert_eq!(game.session.undo().unwrap(), UndoOutcome::NothingToUndo);
        assert_eq!(game.session.undo().unwrap(), UndoOutcome::NothingToUndo);
        game.assert_matches(level);
        assert_eq!(game.session.move_count(), 0);
    }

    #[test]
    fn when_every_move_is_undone_start_is_restored() {
        let level = r#"
#######
#.  $ #
# $@  #
#.   *#
#######
"#;
        let mut game = GameTestState::new(level);
        let start = game.session.board().clone();
        game.assert_moves(&[Left, Up, Right, Right, Down, Down, Left]);
        let played = game.recorded();
        assert_eq!(played.len(), 7);

        for expected in played.iter().rev() {
            assert_eq!(game.session.undo().unwrap(), UndoOutcome::Undone(*expected));
        }
        assert_eq!(game.session.board(), &start);
        assert_eq!(game.session.move_count(), 0);
        assert_eq!(game.session.undo().unwrap(), UndoOutcome::NothingToUndo);
    }

    /// Every direction, walking and pushing, on and off targets.
    #[test]
    fn revert_inverts_step_in_every_direction() {
        let levels = [
            r#"
#######
#  .  #
#  $  #
#.$@$.#
#  $  #
#  .  #
#######
"#,
            r#"
#######
#  *  #
#  .  #
#* + *#
#  .  #
#  *  #
#######
"#,
            r#"
#######
#     #
#  *  #
# *+* #
#  *  #
#     #
#######
"#,
            r#"
#####
#   #
# @ #
#   #
#####
"#,
        ];
        for level in levels {
            for dir in Direction::ALL {
                let mut board = board_from(level);
                let mut player = board.find_player().unwrap();
                let before = board.clone();
                let before_player = player;

                let MoveOutcome::Moved(mv) = step(&mut board, &mut player, dir) else {
                    panic!("expected {:?} to move in\n{}", dir, level);
                };
                assert_ne!(board, before);
                revert(&mut board, &mut player, mv).unwrap();
                assert_eq!(board, before, "{:?} in\n{}", mv, level);
                assert_eq!(player, before_player);
            }
        }
    }

    #[test]
    fn revert_rejects_a_move_that_never_happened() {
        let mut board = board_from(r#"
#####
#@ $#
#####
"#);
        let mut player = board.find_player().unwrap();
        let err = revert(&mut board, &mut player, Move::walk(Right)).unwrap_err();
        assert!(matches!(err, GameError::HistoryMismatch { .. }));
        assert!(!err.is_recoverable());
        assert_eq!(player, Position { row: 1, col: 1 });
    }
}
