use std::num::NonZeroU64;

use crate::domain::TimerState;

/// What a single tick did to the countdown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was idle; nothing changed.
    Skipped,
    /// One second elapsed; carries the new remaining time.
    Decremented(u64),
    /// The cycle reached zero and was reloaded with the given length.
    Restarted(u64),
}

/// Remaining-seconds state machine behind the timer screen.
///
/// The engine never stops itself: a zero-crossing reloads the next cycle and
/// only [`CountdownEngine::stop`] returns it to idle.
#[derive(Debug, Clone, Default)]
pub struct CountdownEngine {
    state: TimerState,
    remaining: u64,
    cycle: u64,
}

impl CountdownEngine {
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            remaining: 0,
            cycle: 0,
        }
    }

    pub fn start(&mut self, total: NonZeroU64) {
        self.state = TimerState::Running;
        self.remaining = total.get();
        self.cycle = total.get();
    }

    /// Returns whether the engine was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = TimerState::Idle;
        self.remaining = 0;
        was_running
    }

    /// Advances one second. `reload` is the interval configured right now;
    /// it only becomes the cycle length at the next zero-crossing.
    pub fn tick(&mut self, reload: NonZeroU64) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Skipped;
        }
        if self.remaining <= 1 {
            self.remaining = reload.get();
            self.cycle = reload.get();
            return TickOutcome::Restarted(self.remaining);
        }
        self.remaining -= 1;
        TickOutcome::Decremented(self.remaining)
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Length of the cycle in progress, zero while idle.
    pub fn cycle_seconds(&self) -> u64 {
        if self.is_running() { self.cycle } else { 0 }
    }
}
