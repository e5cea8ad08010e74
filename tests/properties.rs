//! Property-based tests for the game core.
//!
//! Arbitrary sequences of clicks, waits and restarts are replayed through
//! the runtime; the board and session invariants must hold after every step.

use std::collections::HashMap;
use std::time::Duration;

use memory_match::game::{CardFace, CardState, TurnPhase};
use memory_match::{
    DisplayMode, Game, GameConfig, GameEvent, Level, ManualScheduler, Runtime, Signal,
};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Step {
    Click(usize),
    Wait(u64),
    Restart,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (0usize..70).prop_map(Step::Click),
        3 => (0u64..1500).prop_map(Step::Wait),
        1 => Just(Step::Restart),
    ]
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Easy), Just(Level::Medium), Just(Level::Hard)]
}

fn mode_strategy() -> impl Strategy<Value = DisplayMode> {
    prop_oneof![Just(DisplayMode::Images), Just(DisplayMode::Numbers)]
}

fn face_counts(rt: &Runtime<ManualScheduler>) -> HashMap<CardFace, usize> {
    let mut counts = HashMap::new();
    for card in rt.game().state().deck().cards() {
        *counts.entry(card.face()).or_insert(0) += 1;
    }
    counts
}

/// Solves the board by looking at the faces, one pair per turn.
fn solve(rt: &mut Runtime<ManualScheduler>) -> Vec<Signal> {
    let mut by_face: HashMap<CardFace, Vec<usize>> = HashMap::new();
    for card in rt.game().state().deck().cards() {
        by_face.entry(card.face()).or_default().push(card.position());
    }
    let mut signals = Vec::new();
    for positions in by_face.values() {
        signals.extend(rt.dispatch(GameEvent::SelectCard(positions[0])));
        signals.extend(rt.dispatch(GameEvent::SelectCard(positions[1])));
    }
    signals
}

proptest! {
    #[test]
    fn prop_every_face_dealt_twice(seed in any::<u64>(), level in level_strategy(), mode in mode_strategy()) {
        let game = Game::with_seed(GameConfig::for_level(level, mode), seed);
        let rt = Runtime::new(game, ManualScheduler::new());
        let grid = level.grid_size();

        prop_assert_eq!(rt.game().state().deck().len(), grid.card_count());
        let counts = face_counts(&rt);
        prop_assert_eq!(counts.len(), grid.pair_count());
        prop_assert!(counts.values().all(|&count| count == 2));
    }

    #[test]
    fn prop_invariants_hold_under_arbitrary_play(
        seed in any::<u64>(),
        level in level_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..200),
    ) {
        let config = GameConfig::for_level(level, DisplayMode::Numbers);
        let mut rt = Runtime::new(Game::with_seed(config, seed), ManualScheduler::new());

        for step in steps {
            let moves_before = rt.game().state().session().move_count();
            let was_finished = rt.game().state().session().is_finished();
            let deck_before = rt.game().state().deck().clone();

            let signals = match step {
                Step::Click(position) => rt.dispatch(GameEvent::SelectCard(position)),
                Step::Wait(ms) => rt.advance(Duration::from_millis(ms)),
                Step::Restart => rt.dispatch(GameEvent::NewGame {
                    grid: level.grid_size(),
                    mode: DisplayMode::Numbers,
                }),
            };

            let state = rt.game().state();
            let deck = state.deck();
            let session = state.session();

            prop_assert!(state.revealed_count() <= 2);
            prop_assert_eq!(session.is_finished(), deck.all_matched());

            let comparisons = signals
                .iter()
                .filter(|s| matches!(s, Signal::Match { .. } | Signal::Mismatch { .. }))
                .count() as u32;
            if !matches!(step, Step::Restart) {
                prop_assert_eq!(session.move_count(), moves_before + comparisons);
            }
            if let Step::Click(_) = step {
                prop_assert!(comparisons <= 1);
            }

            if was_finished && !matches!(step, Step::Restart) {
                prop_assert_eq!(deck, &deck_before);
                prop_assert!(signals.is_empty());
            }

            match state.phase() {
                TurnPhase::Idle => {
                    prop_assert_eq!(state.revealed_count(), 0);
                }
                TurnPhase::OneSelected { first } => {
                    prop_assert_eq!(state.revealed_count(), 1);
                    prop_assert_eq!(deck.state(first), Some(CardState::Revealed));
                }
                TurnPhase::Concealing { first, second } => {
                    prop_assert_eq!(state.revealed_count(), 2);
                    prop_assert_ne!(deck.face(first), deck.face(second));
                }
                TurnPhase::Evaluating { .. } => {
                    prop_assert!(false, "evaluation leaked out of a dispatch");
                }
            }
        }
    }

    #[test]
    fn prop_mismatch_conceals_exactly_once(seed in any::<u64>(), level in level_strategy()) {
        let config = GameConfig::for_level(level, DisplayMode::Images);
        let mut rt = Runtime::new(Game::with_seed(config, seed), ManualScheduler::new());

        let deck = rt.game().state().deck().clone();
        let first_face = deck.face(0);
        let other = (1..deck.len()).find(|&p| deck.face(p) != first_face).unwrap();

        rt.dispatch(GameEvent::SelectCard(0));
        rt.dispatch(GameEvent::SelectCard(other));
        let signals = rt.advance(Duration::from_secs(10));

        let conceals = signals.iter().filter(|s| matches!(s, Signal::Conceal { .. })).count();
        prop_assert_eq!(conceals, 1);
        prop_assert_eq!(rt.scheduler().conceals_scheduled(), 1);
        prop_assert_eq!(rt.game().state().deck().count(CardState::Hidden), deck.len());
        prop_assert_eq!(rt.game().state().phase(), TurnPhase::Idle);
    }

    #[test]
    fn prop_solving_completes_once(seed in any::<u64>(), level in level_strategy()) {
        let config = GameConfig::for_level(level, DisplayMode::Numbers);
        let mut rt = Runtime::new(Game::with_seed(config, seed), ManualScheduler::new());
        let pairs = level.grid_size().pair_count() as u32;

        let signals = solve(&mut rt);
        let completed: Vec<_> = signals
            .iter()
            .filter_map(|s| match s {
                Signal::Completed { moves, .. } => Some(*moves),
                _ => None,
            })
            .collect();
        prop_assert_eq!(completed, vec![pairs]);
        let any_mismatch = signals.iter().any(|s| matches!(s, Signal::Mismatch { .. }));
        prop_assert!(!any_mismatch);
        prop_assert!(rt.game().state().session().is_finished());
    }
}
