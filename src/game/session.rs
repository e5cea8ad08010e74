/// Move counter and elapsed-time clock for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    move_count: u32,
    elapsed_secs: u32,
    started: bool,
    finished: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed two-card comparisons, matches and mismatches alike.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` only on the call that actually starts the clock.
    pub(crate) fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    pub(crate) fn record_comparison(&mut self) {
        self.move_count = self.move_count.saturating_add(1);
    }

    /// Advances the clock by one second while it runs.
    pub(crate) fn tick(&mut self) -> bool {
        if !self.started || self.finished {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }
}
