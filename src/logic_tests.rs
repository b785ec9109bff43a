#[cfg(test)]
mod tests {
    use crate::core::{Grid, MoveRecord, PlayerId, PlayerKind, COLS, ROWS};
    use crate::error::MoveError;
    use crate::game::{GameLogPlayer, GameState, GameStatus, ReplayStatus, Scheduler, TaskKind};
    use crate::logic::{find_winner, legal_columns, winning_line};
    use crate::network::BotMoveResponse;
    use crate::player::{BotController, RandomBot};
    use crate::selfplay::simulate_game;
    use std::time::{Duration, Instant};

    const P1: PlayerId = PlayerId::Player1;
    const P2: PlayerId = PlayerId::Player2;

    #[test]
    fn test_drop_lands_in_lowest_empty_row() {
        let mut grid = Grid::new();
        assert_eq!(grid.drop(3, P1), Ok(ROWS - 1));
        assert_eq!(grid.drop(3, P2), Ok(ROWS - 2));
        assert_eq!(grid.drop(3, P1), Ok(ROWS - 3));
        assert_eq!(grid.get(ROWS - 1, 3), Some(P1));
        assert_eq!(grid.get(ROWS - 2, 3), Some(P2));
        // Cells below an occupied cell are never empty
        for row in (ROWS - 3)..ROWS {
            assert!(grid.get(row, 3).is_some());
        }
    }

    #[test]
    fn test_drop_rejects_bad_columns() {
        let mut grid = Grid::new();
        assert_eq!(grid.drop(COLS, P1), Err(MoveError::OutOfRange(COLS)));

        for _ in 0..ROWS {
            grid.drop(0, P1).unwrap();
        }
        assert!(grid.is_column_full(0));
        assert_eq!(grid.drop(0, P2), Err(MoveError::ColumnFull(0)));
    }

    #[test]
    fn test_flatten_is_row_major_marks() {
        let mut grid = Grid::new();
        grid.drop(0, P1).unwrap();
        grid.drop(1, P2).unwrap();

        let flat = grid.flatten();
        assert_eq!(flat.len(), ROWS * COLS);
        assert_eq!(flat[(ROWS - 1) * COLS], 1);
        assert_eq!(flat[(ROWS - 1) * COLS + 1], 2);
        assert_eq!(flat.iter().filter(|&&v| v == 0).count(), ROWS * COLS - 2);
    }

    #[test]
    fn test_empty_grid_has_no_winner() {
        assert_eq!(find_winner(&Grid::new()), None);
    }

    #[test]
    fn test_vertical_win() {
        let mut grid = Grid::new();
        // Four in column 3: rows 5, 4, 3, 2
        for _ in 0..4 {
            grid.drop(3, P1).unwrap();
        }
        assert_eq!(find_winner(&grid), Some(P1));

        let (winner, line) = winning_line(&grid).unwrap();
        assert_eq!(winner, P1);
        assert_eq!(line, [(2, 3), (3, 3), (4, 3), (5, 3)]);
    }

    #[test]
    fn test_horizontal_win() {
        let mut grid = Grid::new();
        for col in 0..4 {
            grid.drop(col, P2).unwrap();
        }
        assert_eq!(find_winner(&grid), Some(P2));
        let (_, line) = winning_line(&grid).unwrap();
        assert_eq!(line, [(5, 0), (5, 1), (5, 2), (5, 3)]);
    }

    #[test]
    fn test_diagonal_wins() {
        // Down-right diagonal for P1: (2,2) (3,3) (4,4) (5,5)
        let mut grid = Grid::new();
        grid.drop(5, P1).unwrap();
        grid.drop(4, P2).unwrap();
        grid.drop(4, P1).unwrap();
        grid.drop(3, P2).unwrap();
        grid.drop(3, P2).unwrap();
        grid.drop(3, P1).unwrap();
        grid.drop(2, P2).unwrap();
        grid.drop(2, P2).unwrap();
        grid.drop(2, P2).unwrap();
        grid.drop(2, P1).unwrap();
        assert_eq!(find_winner(&grid), Some(P1));

        // Up-right diagonal for P2: (5,0) (4,1) (3,2) (2,3)
        let mut grid = Grid::new();
        grid.drop(0, P2).unwrap();
        grid.drop(1, P1).unwrap();
        grid.drop(1, P2).unwrap();
        grid.drop(2, P1).unwrap();
        grid.drop(2, P1).unwrap();
        grid.drop(2, P2).unwrap();
        grid.drop(3, P1).unwrap();
        grid.drop(3, P1).unwrap();
        grid.drop(3, P1).unwrap();
        grid.drop(3, P2).unwrap();
        assert_eq!(find_winner(&grid), Some(P2));
    }

    #[test]
    fn test_legal_columns_shrink_as_columns_fill() {
        let mut grid = Grid::new();
        assert_eq!(legal_columns(&grid), (0..COLS).collect::<Vec<_>>());
        for _ in 0..ROWS {
            grid.drop(2, P1).unwrap();
        }
        assert!(!legal_columns(&grid).contains(&2));
        assert_eq!(legal_columns(&grid).len(), COLS - 1);
    }

    /// A full 42-move game with no four-in-a-row anywhere: cell (r, c) gets
    /// the mark of parity (c/2 + r) % 2, filled in a legal alternating move
    /// order (tandem column pairs with opposite bottom marks, then column 5).
    fn drawn_game_columns() -> Vec<usize> {
        let mut cols = Vec::new();
        for (a, b) in [(0, 2), (1, 3), (4, 6)] {
            for col in [a, b, b, a, a, b, b, a, a, b, b, a] {
                cols.push(col);
            }
        }
        cols.extend(std::iter::repeat(5).take(ROWS));
        cols
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let mut state = GameState::new();
        for col in drawn_game_columns() {
            let player = state.current_player();
            state.apply_move(player, col).unwrap();
        }
        assert!(state.grid().is_full());
        assert_eq!(find_winner(state.grid()), None);
        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.move_count(), ROWS * COLS);
    }

    #[test]
    fn test_turns_alternate_strictly() {
        let mut state = GameState::new();
        for (i, col) in [0, 1, 2, 3, 4, 5].into_iter().enumerate() {
            let expected = PlayerId::from_index(i % 2).unwrap();
            assert_eq!(state.current_player(), expected);
            state.apply_move(expected, col).unwrap();
            assert_eq!(state.move_count(), i + 1);
        }
    }

    #[test]
    fn test_out_of_turn_move_is_rejected_unchanged() {
        let mut state = GameState::new();
        let before = state.clone();
        assert_eq!(state.apply_move(P2, 0), Err(MoveError::OutOfTurn(P2)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_win_is_terminal_and_idempotent() {
        let mut state = GameState::new();
        // P1 stacks column 0, P2 column 1; P1 completes the vertical four
        for _ in 0..3 {
            state.apply_move(P1, 0).unwrap();
            state.apply_move(P2, 1).unwrap();
        }
        state.apply_move(P1, 0).unwrap();
        assert_eq!(state.status(), GameStatus::Won(P1));

        let decided = state.clone();
        for col in 0..COLS {
            assert_eq!(state.apply_move(P2, col), Err(MoveError::TerminalState));
            assert_eq!(state.apply_move(P1, col), Err(MoveError::TerminalState));
        }
        assert_eq!(state, decided);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut state = GameState::new();
        state.apply_move(P1, 3).unwrap();
        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_replay_reproduces_direct_play() {
        let columns = [0, 1, 0, 1, 2, 3, 4, 5];

        let mut direct = GameState::new();
        let mut log = Vec::new();
        for col in columns {
            let player = direct.current_player();
            direct.apply_move(player, col).unwrap();
            log.push(MoveRecord::new(player, col));
        }

        let mut replayed = GameState::new();
        let mut player = GameLogPlayer::new();
        player.load(log);
        while player.status() == ReplayStatus::Playing {
            assert_eq!(player.step(&mut replayed), None);
        }

        assert_eq!(replayed.grid(), direct.grid());
        assert_eq!(player.status(), ReplayStatus::Finished);
    }

    #[test]
    fn test_replay_skips_malformed_entries() {
        let log = vec![
            MoveRecord::new(P1, 0),
            // Out-of-range column
            MoveRecord::new(P2, 99),
            // Missing column (agent error in the source log)
            MoveRecord {
                player: 2,
                column: None,
            },
            // Bad player mark
            MoveRecord {
                player: 7,
                column: Some(1),
            },
            MoveRecord::new(P2, 1),
        ];

        let mut state = GameState::new();
        let mut player = GameLogPlayer::new();
        player.load(log);

        assert_eq!(player.step(&mut state), None);
        assert!(player.step(&mut state).is_some());
        assert!(player.step(&mut state).is_some());
        assert!(player.step(&mut state).is_some());
        assert_eq!(player.step(&mut state), None);

        assert_eq!(player.status(), ReplayStatus::Finished);
        assert_eq!(state.move_count(), 2);
        assert_eq!(state.grid().get(ROWS - 1, 0), Some(P1));
        assert_eq!(state.grid().get(ROWS - 1, 1), Some(P2));
    }

    #[test]
    fn test_replay_finishes_on_win_with_entries_left() {
        // P1 wins vertically on move 7; the trailing entry is never applied
        let mut log = Vec::new();
        for _ in 0..3 {
            log.push(MoveRecord::new(P1, 0));
            log.push(MoveRecord::new(P2, 1));
        }
        log.push(MoveRecord::new(P1, 0));
        log.push(MoveRecord::new(P2, 6));

        let mut state = GameState::new();
        let mut player = GameLogPlayer::new();
        player.load(log);
        while player.status() == ReplayStatus::Playing {
            player.step(&mut state);
        }

        assert_eq!(state.status(), GameStatus::Won(P1));
        assert_eq!(state.grid().get(ROWS - 1, 6), None);
        let (consumed, total) = player.progress();
        assert_eq!(consumed, total - 1);
    }

    #[test]
    fn test_replay_stop_discards_position() {
        let mut state = GameState::new();
        let mut player = GameLogPlayer::new();
        player.load(vec![MoveRecord::new(P1, 0), MoveRecord::new(P2, 1)]);
        player.step(&mut state);
        player.stop();

        assert_eq!(player.status(), ReplayStatus::Idle);
        assert_eq!(player.progress(), (0, 0));
        // A fresh replay starts over from entry 0
        player.load(vec![MoveRecord::new(P1, 2)]);
        assert_eq!(player.progress(), (0, 1));
    }

    #[test]
    fn test_scheduler_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(Duration::ZERO, TaskKind::BotThink(P2));

        assert_eq!(
            scheduler.poll(Instant::now()),
            Some(TaskKind::BotThink(P2))
        );
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.poll(Instant::now()), None);
    }

    #[test]
    fn test_scheduler_does_not_fire_early() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(Duration::from_secs(3600), TaskKind::ReplayTick);
        assert_eq!(scheduler.poll(Instant::now()), None);
        assert!(scheduler.has_pending());
    }

    #[test]
    fn test_scheduler_cancel_prevents_firing() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule_once(Duration::ZERO, TaskKind::ReplayTick);
        scheduler.cancel(token);
        assert_eq!(scheduler.poll(Instant::now()), None);

        // A stale token does not cancel newer work
        let stale = scheduler.schedule_once(Duration::ZERO, TaskKind::ReplayTick);
        scheduler.cancel(stale);
        scheduler.schedule_once(Duration::ZERO, TaskKind::BotThink(P1));
        scheduler.cancel(stale);
        assert_eq!(
            scheduler.poll(Instant::now()),
            Some(TaskKind::BotThink(P1))
        );
    }

    #[test]
    fn test_scheduler_repeating_rearms() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(Duration::ZERO, TaskKind::ReplayTick);

        assert_eq!(scheduler.poll(Instant::now()), Some(TaskKind::ReplayTick));
        assert!(scheduler.has_pending());
        assert_eq!(scheduler.poll(Instant::now()), Some(TaskKind::ReplayTick));

        scheduler.cancel_all();
        assert_eq!(scheduler.poll(Instant::now()), None);
    }

    #[test]
    fn test_move_record_wire_format() {
        let record: MoveRecord = serde_json::from_str(r#"{"player": 1, "move": 3}"#).unwrap();
        assert_eq!(record.slot(), Some(P1));
        assert_eq!(record.column, Some(3));

        // The simulation service reports agent failures with a string move
        let broken: MoveRecord = serde_json::from_str(r#"{"player": 2, "move": "ERROR"}"#).unwrap();
        assert_eq!(broken.slot(), Some(P2));
        assert_eq!(broken.column, None);

        let json = serde_json::to_value(MoveRecord::new(P2, 6)).unwrap();
        assert_eq!(json["player"], 2);
        assert_eq!(json["move"], 6);
    }

    #[test]
    fn test_bot_move_response_wire_format() {
        let response: BotMoveResponse = serde_json::from_str(r#"{"move": 4}"#).unwrap();
        assert_eq!(response.column, 4);
    }

    #[test]
    fn test_player_kind_param_defaults_to_human() {
        assert_eq!(PlayerKind::from_param("bot"), PlayerKind::Bot);
        assert_eq!(PlayerKind::from_param("BOT"), PlayerKind::Bot);
        assert_eq!(PlayerKind::from_param("human"), PlayerKind::Human);
        assert_eq!(PlayerKind::from_param("robot"), PlayerKind::Human);
        assert_eq!(PlayerKind::from_param(""), PlayerKind::Human);
    }

    #[tokio::test]
    async fn test_random_bot_picks_a_legal_column() {
        let bot = RandomBot::new("random");
        let state = GameState::new();
        for _ in 0..20 {
            let col = bot.choose_column(&state).await.unwrap();
            assert!(col < COLS);
        }
    }

    #[tokio::test]
    async fn test_local_simulation_replays_to_the_same_game() {
        let p1 = RandomBot::new("p1");
        let p2 = RandomBot::new("p2");
        let log = simulate_game(&p1, &p2).await.unwrap();
        assert!(!log.is_empty());

        // Replaying the simulated log reproduces a decided game
        let mut state = GameState::new();
        let mut player = GameLogPlayer::new();
        player.load(log.clone());
        while player.status() == ReplayStatus::Playing {
            assert_eq!(player.step(&mut state), None);
        }
        assert_ne!(state.status(), GameStatus::InProgress);
        assert_eq!(state.move_count(), log.len());
    }
}
