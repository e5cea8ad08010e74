//! Routes [`Game`] output to timers.
//!
//! The [`Scheduler`] trait decouples the event loop from a specific timer
//! source. The GTK front end arms `glib` timeouts; [`ManualScheduler`] keeps
//! virtual time so whole games can be replayed without waiting.

use std::time::Duration;

use tracing::trace;

use crate::game::{Command, ConcealTask, Game, GameEvent, Signal};

/// Timer source for conceal tasks and the play clock.
pub trait Scheduler {
    /// Arrange for `task` to come back as [`GameEvent::ConcealDue`] once,
    /// after `delay`. Scheduled tasks are never cancelled.
    fn schedule_conceal(&mut self, task: ConcealTask, delay: Duration);

    /// Deliver [`GameEvent::ClockTick`] every `interval` until stopped.
    /// Starting a running clock restarts it.
    fn start_clock(&mut self, interval: Duration);

    fn stop_clock(&mut self);
}

/// Owns the game and executes the commands it produces.
#[derive(Debug)]
pub struct Runtime<S> {
    game: Game,
    scheduler: S,
}

impl<S: Scheduler> Runtime<S> {
    pub fn new(game: Game, scheduler: S) -> Self {
        Runtime { game, scheduler }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Feeds one event to the game, arms whatever timers it asked for and
    /// hands back the signals for the presentation layer.
    pub fn dispatch(&mut self, event: GameEvent) -> Vec<Signal> {
        let reaction = self.game.handle(event);
        for command in reaction.commands {
            trace!(?command, "executing command");
            match command {
                Command::ScheduleConceal { task, delay } => {
                    self.scheduler.schedule_conceal(task, delay);
                }
                Command::StartClock { interval } => self.scheduler.start_clock(interval),
                Command::StopClock => self.scheduler.stop_clock(),
            }
        }
        reaction.signals
    }
}

impl Runtime<ManualScheduler> {
    /// Moves virtual time forward, dispatching every timer that comes due
    /// on the way, including timers armed by those dispatches.
    pub fn advance(&mut self, by: Duration) -> Vec<Signal> {
        let until = self.scheduler.now() + by;
        let mut signals = Vec::new();
        while let Some(event) = self.scheduler.pop_due(until) {
            signals.extend(self.dispatch(event));
        }
        self.scheduler.set_now(until);
        signals
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Clock {
    interval: Duration,
    next_due: Duration,
}

/// Virtual-time scheduler.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    conceals: Vec<(Duration, ConcealTask)>,
    clock: Option<Clock>,
    conceals_scheduled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Conceal tasks armed but not yet delivered.
    pub fn pending_conceals(&self) -> usize {
        self.conceals.len()
    }

    /// Conceal tasks armed since creation.
    pub fn conceals_scheduled(&self) -> usize {
        self.conceals_scheduled
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the virtual clock to its due time. Ties go to the conceal.
    pub fn pop_due(&mut self, until: Duration) -> Option<GameEvent> {
        let conceal = self
            .conceals
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, _))| *due)
            .map(|(index, (due, _))| (index, *due));
        let tick = self.clock.map(|clock| clock.next_due);

        match (conceal, tick) {
            (Some((index, due)), tick) if due <= until && tick.is_none_or(|t| due <= t) => {
                let (_, task) = self.conceals.remove(index);
                self.set_now(due);
                Some(GameEvent::ConcealDue(task))
            }
            (_, Some(due)) if due <= until => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.next_due = due + clock.interval;
                }
                self.set_now(due);
                Some(GameEvent::ClockTick)
            }
            _ => None,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_conceal(&mut self, task: ConcealTask, delay: Duration) {
        self.conceals.push((self.now + delay, task));
        self.conceals_scheduled += 1;
    }

    fn start_clock(&mut self, interval: Duration) {
        self.clock = Some(Clock {
            interval,
            next_due: self.now + interval,
        });
    }

    fn stop_clock(&mut self) {
        self.clock = None;
    }
}
