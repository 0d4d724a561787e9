//! Property tests over generated boards and random play.
//!
//! Each session is driven by an arbitrary sequence of reveals and flag toggles, and the
//! bookkeeping invariants are checked after every move.

use msweep_core::*;
use proptest::prelude::*;

#[derive(Copy, Clone, Debug)]
enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (1..=16u8, 1..=16u8)
        .prop_filter("board needs room for a mine and a safe cell", |&(r, c)| {
            mult(r, c) >= 2
        })
        .prop_flat_map(|(rows, columns)| {
            (1..mult(rows, columns)).prop_map(move |mines| {
                GameConfig::new((rows, columns), mines).expect("strategy yields valid configs")
            })
        })
}

fn moves_strategy(size: Coord2) -> impl Strategy<Value = Vec<Move>> {
    let coords = (0..size.0, 0..size.1);
    let single = prop_oneof![
        1 => coords.clone().prop_map(Move::Reveal),
        2 => coords.prop_map(Move::Flag),
    ];
    prop::collection::vec(single, 0..64)
}

fn game_strategy() -> impl Strategy<Value = (GameConfig, u64, Vec<Move>)> {
    (config_strategy(), any::<u64>())
        .prop_flat_map(|(config, seed)| (Just(config), Just(seed), moves_strategy(config.size())))
}

fn assert_bookkeeping(session: &GameSession) {
    let snapshot = session.snapshot();

    // Flag conservation.
    assert_eq!(
        session.flags_remaining() + snapshot.count(RevealState::Flagged),
        session.total_mines()
    );

    // Score counts revealed safe cells only.
    let revealed_safe = snapshot
        .iter()
        .filter(|(_, view)| matches!(view.content(), Some(content) if !content.is_mine()))
        .count();
    assert_eq!(usize::from(session.score()), revealed_safe);

    // Correct flags are flags on actual mines.
    if let Some(solution) = session.solution() {
        let correct = snapshot
            .iter()
            .filter(|&(coords, view)| {
                view == CellView::Flagged
                    && solution[coords] == CellView::Revealed(CellContent::Mine)
            })
            .count();
        assert_eq!(usize::from(session.mines_flagged_correctly()), correct);
    }

    match session.status() {
        SessionStatus::Won(score) => {
            assert_eq!(score, session.score());
            assert_eq!(session.mines_flagged_correctly(), session.total_mines());
        }
        SessionStatus::Lost(score) => {
            assert_eq!(score, session.score());
            assert!(session.triggered_mine().is_some());
        }
        SessionStatus::InProgress => {
            assert!(session.mines_flagged_correctly() < session.total_mines());
        }
    }
}

proptest! {
    #[test]
    fn generated_boards_hold_exact_mine_count(config in config_strategy(), seed in any::<u64>()) {
        let board = RandomBoardGenerator::from_seed(seed).generate(config);

        prop_assert_eq!(board.game_config(), config);
        prop_assert_eq!(board.iter_mines().count(), usize::from(config.mines()));

        for coords in iter_coords(board.size()) {
            let live = board.count_adjacent_mines(coords);
            match board[coords] {
                CellContent::Mine => {}
                CellContent::Empty => {
                    prop_assert_eq!(live, 0);
                }
                CellContent::AdjacentCount(count) => {
                    prop_assert!(count <= 8);
                    prop_assert_eq!(count, live);
                }
            }
        }
    }

    #[test]
    fn random_play_keeps_bookkeeping((config, seed, moves) in game_strategy()) {
        let mut session = GameSession::with_config(config, Some(seed));

        for action in moves {
            let was_finished = session.is_finished();
            let before = session.clone();

            match action {
                Move::Reveal(coords) => {
                    let outcome = session.reveal(coords).unwrap();
                    if was_finished {
                        prop_assert_eq!(&outcome, &RevealOutcome::AlreadyTerminal);
                    }
                    if let RevealOutcome::CellsOpened(opened) = &outcome {
                        prop_assert!(opened.contains(&coords));
                        prop_assert_eq!(
                            usize::from(session.score() - before.score()),
                            opened.len()
                        );
                        prop_assert!(opened.iter().all(|&pos| !session.snapshot()[pos]
                            .content()
                            .is_some_and(CellContent::is_mine)));
                    }
                }
                Move::Flag(coords) => {
                    let outcome = session.toggle_flag(coords).unwrap();
                    if was_finished {
                        prop_assert_eq!(outcome, FlagOutcome::AlreadyTerminal);
                    }
                }
            }

            if was_finished {
                prop_assert_eq!(&session, &before);
            }
            assert_bookkeeping(&session);
        }
    }

    #[test]
    fn reveal_is_idempotent(
        config in config_strategy(),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut session = GameSession::with_config(config, Some(seed));
        let safe: Vec<Coord2> = iter_coords(config.size())
            .filter(|&coords| {
                let mut trial = session.clone();
                trial.reveal(coords).unwrap() != RevealOutcome::MineHit
            })
            .collect();
        let target = safe[pick.index(safe.len())];

        session.reveal(target).unwrap();
        let after_first = session.clone();

        prop_assert_eq!(session.reveal(target).unwrap(), RevealOutcome::NoOp);
        prop_assert_eq!(session, after_first);
    }
}

#[test]
fn presets_can_be_played_to_a_win_by_flagging() {
    for difficulty in Difficulty::ALL {
        let mut session = GameSession::new_game(difficulty, Some(11));
        let mines: Vec<Coord2> = iter_coords(session.size())
            .filter(|&coords| {
                let mut trial = session.clone();
                trial.reveal(coords).unwrap() == RevealOutcome::MineHit
            })
            .collect();
        assert_eq!(mines.len(), usize::from(session.total_mines()));

        for &mine in &mines {
            assert_eq!(session.toggle_flag(mine).unwrap(), FlagOutcome::Placed);
        }

        assert_eq!(session.status(), SessionStatus::Won(0));
        assert_eq!(session.flags_remaining(), 0);
    }
}

#[test]
fn loss_example_leaves_score_untouched() {
    let board = Board::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
    let mut session = GameSession::with_board(board);

    session.reveal((0, 1)).unwrap();
    let score = session.score();

    assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::MineHit);
    assert_eq!(session.status(), SessionStatus::Lost(score));
}

#[test]
fn presentation_round_trip_through_diffs() {
    let mut session = GameSession::new_game(Difficulty::Medium, Some(2024));
    let mut rendered = Snapshot::blank(session.size());

    let safe = iter_coords(session.size())
        .find(|&coords| {
            let mut trial = session.clone();
            trial.reveal(coords).unwrap() != RevealOutcome::MineHit
        })
        .unwrap();

    let outcome = session.reveal(safe).unwrap();
    let current = session.snapshot();
    let updates = current.diff(&rendered).unwrap();

    let opened = outcome.opened().unwrap();
    assert_eq!(updates.len(), opened.len());
    assert!(updates.iter().all(|update| opened.contains(&update.coords)));

    rendered = current;
    assert!(session.snapshot().diff(&rendered).unwrap().is_empty());
}
