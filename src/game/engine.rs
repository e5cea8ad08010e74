use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::{DisplayMode, GameConfig, GridSize};
use crate::error::ConfigError;

use super::deck::{BoardGenerator, CardState, Deck};
use super::event::GameEvent;
use super::session::Session;
use super::signal::{Command, Reaction, Signal};
use super::turn::{ConcealTask, TurnMachine, TurnOutcome, TurnPhase};

/// Everything belonging to one dealt game. Replaced as a whole on restart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    deck: Deck,
    turn: TurnMachine,
    session: Session,
    epoch: u64,
}

impl GameState {
    fn dealt(deck: Deck, epoch: u64) -> Self {
        GameState {
            deck,
            turn: TurnMachine::new(),
            session: Session::new(),
            epoch,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Generation number; bumped every time a new deck is dealt.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_busy(&self) -> bool {
        self.turn.is_busy()
    }

    pub fn revealed_count(&self) -> usize {
        self.deck.count(CardState::Revealed)
    }
}

/// The memory game core: one deck, one turn machine, one session.
///
/// All input arrives through [`Game::handle`] (or the matching helper
/// methods) and every change is reported back as a [`Reaction`].
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    generator: BoardGenerator,
    rng: StdRng,
    state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, BoardGenerator::default(), StdRng::from_os_rng())
    }

    /// Deterministic deals, for replays and tests.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, BoardGenerator::default(), StdRng::seed_from_u64(seed))
    }

    pub fn with_generator(config: GameConfig, generator: BoardGenerator, mut rng: StdRng) -> Self {
        let deck = generator.deal(config.grid, config.mode, &mut rng);
        Game {
            config,
            generator,
            rng,
            state: GameState::dealt(deck, 1),
        }
    }

    /// Starts from an explicit layout instead of a random deal.
    pub fn from_deck(config: GameConfig, deck: Deck) -> Result<Self, ConfigError> {
        if deck.len() != config.grid.card_count() {
            return Err(ConfigError::DeckSizeMismatch {
                expected: config.grid.card_count(),
                actual: deck.len(),
            });
        }
        Ok(Game {
            config,
            generator: BoardGenerator::default(),
            rng: StdRng::from_os_rng(),
            state: GameState::dealt(deck, 1),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn handle(&mut self, event: GameEvent) -> Reaction {
        match event {
            GameEvent::NewGame { grid, mode } => self.new_game(grid, mode),
            GameEvent::SelectCard(position) => self.select_card(position),
            GameEvent::SetDisplayMode(mode) => self.set_display_mode(mode),
            GameEvent::SetGridSize(grid) => self.set_grid_size(grid),
            GameEvent::ClockTick => self.tick(),
            GameEvent::ConcealDue(task) => self.conceal(task),
        }
    }

    pub fn new_game(&mut self, grid: GridSize, mode: DisplayMode) -> Reaction {
        self.config.grid = grid;
        self.config.mode = mode;
        let epoch = self.state.epoch.wrapping_add(1);
        let deck = self.generator.deal(grid, mode, &mut self.rng);
        self.state = GameState::dealt(deck, epoch);
        debug!(grid = grid.side(), mode = mode.name(), epoch, "dealt new deck");

        let mut reaction = Reaction::none();
        reaction.command(Command::StopClock);
        reaction.signal(Signal::BoardReset { grid, mode, epoch });
        reaction.signal(self.session_updated());
        reaction
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Reaction {
        self.new_game(self.config.grid, mode)
    }

    pub fn set_grid_size(&mut self, grid: GridSize) -> Reaction {
        self.new_game(grid, self.config.mode)
    }

    /// Flips the card at `position`. Out-of-range positions, cards that are
    /// not face-down, and clicks during a conceal window do nothing.
    pub fn select_card(&mut self, position: usize) -> Reaction {
        let epoch = self.state.epoch;
        let outcome = self.state.turn.select(&mut self.state.deck, position, epoch);
        if outcome == TurnOutcome::Rejected {
            trace!(position, "selection ignored");
            return Reaction::none();
        }

        let mut reaction = Reaction::none();
        if self.state.session.start() {
            reaction.command(Command::StartClock {
                interval: self.config.timing.clock_interval(),
            });
        }
        if let Some(face) = self.state.deck.face(position) {
            reaction.signal(Signal::Flip { position, face });
        }

        match outcome {
            TurnOutcome::Rejected | TurnOutcome::Flipped => {}
            TurnOutcome::Matched { first, second } => {
                trace!(first, second, "pair matched");
                reaction.signal(Signal::Match { first, second });
                self.state.session.record_comparison();
                reaction.signal(self.session_updated());
                if self.state.deck.all_matched() {
                    self.finish(&mut reaction);
                }
            }
            TurnOutcome::Mismatched(task) => {
                trace!(first = task.first, second = task.second, "pair mismatched");
                self.state.session.record_comparison();
                reaction.signal(Signal::Mismatch {
                    first: task.first,
                    second: task.second,
                });
                reaction.signal(self.session_updated());
                reaction.command(Command::ScheduleConceal {
                    task,
                    delay: self.config.timing.conceal_delay(),
                });
            }
        }
        reaction
    }

    pub fn tick(&mut self) -> Reaction {
        let mut reaction = Reaction::none();
        if self.state.session.tick() {
            reaction.signal(self.session_updated());
        }
        reaction
    }

    /// Turns a mismatched pair back over. Tasks from an earlier deal are
    /// dropped.
    pub fn conceal(&mut self, task: ConcealTask) -> Reaction {
        if task.epoch != self.state.epoch {
            debug!(
                task_epoch = task.epoch,
                epoch = self.state.epoch,
                "ignoring conceal task from a previous game"
            );
            return Reaction::none();
        }
        let mut reaction = Reaction::none();
        if self.state.turn.conceal(&mut self.state.deck, &task) {
            reaction.signal(Signal::Conceal {
                first: task.first,
                second: task.second,
            });
        }
        reaction
    }

    fn finish(&mut self, reaction: &mut Reaction) {
        self.state.session.finish();
        let session = &self.state.session;
        info!(
            moves = session.move_count(),
            elapsed_secs = session.elapsed_secs(),
            "board cleared"
        );
        reaction.command(Command::StopClock);
        reaction.signal(Signal::Completed {
            moves: session.move_count(),
            elapsed_secs: session.elapsed_secs(),
        });
    }

    fn session_updated(&self) -> Signal {
        Signal::SessionUpdated {
            moves: self.state.session.move_count(),
            elapsed_secs: self.state.session.elapsed_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Level;
    use crate::game::deck::CardFace;

    fn small_game() -> Game {
        let faces = (1..=8)
            .flat_map(|n| [CardFace::Number(n), CardFace::Number(n)])
            .collect();
        let deck = Deck::from_faces(faces).unwrap();
        Game::from_deck(GameConfig::for_level(Level::Easy, DisplayMode::Numbers), deck).unwrap()
    }

    #[test]
    fn first_flip_starts_clock_once() {
        let mut game = small_game();
        let reaction = game.select_card(0);
        assert!(reaction.commands.iter().any(|c| matches!(c, Command::StartClock { .. })));
        assert_eq!(
            reaction.signals,
            vec![Signal::Flip { position: 0, face: CardFace::Number(1) }]
        );

        let reaction = game.select_card(1);
        assert!(!reaction.commands.iter().any(|c| matches!(c, Command::StartClock { .. })));
    }

    #[test]
    fn match_emits_signals_in_order() {
        let mut game = small_game();
        game.select_card(2);
        let reaction = game.select_card(3);
        assert_eq!(
            reaction.signals,
            vec![
                Signal::Flip { position: 3, face: CardFace::Number(2) },
                Signal::Match { first: 2, second: 3 },
                Signal::SessionUpdated { moves: 1, elapsed_secs: 0 },
            ]
        );
        assert!(reaction.commands.is_empty());
    }

    #[test]
    fn mismatch_schedules_one_conceal() {
        let mut game = small_game();
        game.select_card(0);
        let reaction = game.select_card(2);
        let task = ConcealTask { epoch: 1, first: 0, second: 2 };
        assert_eq!(
            reaction.commands,
            vec![Command::ScheduleConceal {
                task,
                delay: std::time::Duration::from_millis(700)
            }]
        );
        assert!(reaction.signals.contains(&Signal::Mismatch { first: 0, second: 2 }));

        let reaction = game.conceal(task);
        assert_eq!(reaction.signals, vec![Signal::Conceal { first: 0, second: 2 }]);
        assert_eq!(game.state().phase(), TurnPhase::Idle);
        assert_eq!(game.state().session().move_count(), 1);
    }

    #[test]
    fn stale_conceal_is_ignored_after_restart() {
        let mut game = small_game();
        game.select_card(0);
        game.select_card(2);
        let stale = ConcealTask { epoch: 1, first: 0, second: 2 };

        let reaction = game.new_game(Level::Easy.grid_size(), DisplayMode::Numbers);
        assert_eq!(reaction.commands, vec![Command::StopClock]);
        assert_eq!(game.state().epoch(), 2);

        game.select_card(0);
        let before = game.state().clone();
        assert!(game.conceal(stale).is_empty());
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut game = small_game();
        assert!(game.tick().is_empty());
        game.select_card(0);
        assert_eq!(
            game.tick().signals,
            vec![Signal::SessionUpdated { moves: 0, elapsed_secs: 1 }]
        );
    }

    #[test]
    fn mode_and_level_changes_restart() {
        let mut game = small_game();
        game.select_card(0);
        let reaction = game.set_display_mode(DisplayMode::Images);
        assert!(matches!(
            reaction.signals[0],
            Signal::BoardReset { mode: DisplayMode::Images, epoch: 2, .. }
        ));
        assert_eq!(game.state().session(), &Session::new());

        game.set_grid_size(Level::Hard.grid_size());
        assert_eq!(game.state().deck().len(), 64);
        assert_eq!(game.config().mode, DisplayMode::Images);
        assert!(game.state().deck().cards().iter().all(|c| matches!(c.face(), CardFace::Image(_))));
    }

    #[test]
    fn from_deck_checks_card_count() {
        let deck = Deck::from_faces(vec![CardFace::Number(1), CardFace::Number(1)]).unwrap();
        let config = GameConfig::for_level(Level::Easy, DisplayMode::Numbers);
        assert_eq!(
            Game::from_deck(config, deck).err(),
            Some(ConfigError::DeckSizeMismatch { expected: 16, actual: 2 })
        );
    }
}
