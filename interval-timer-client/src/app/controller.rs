use std::num::NonZeroU64;

use interval_timer_shared::{
    CountdownEngine, Minutes, TickOutcome, TimerState, ValidationError, parse_minutes,
};
use tracing::{debug, info, trace};

use crate::alert::AlertDispatcher;
use crate::app::screen::ScreenView;
use crate::scheduler::{RunId, TickEvent, TickScheduler};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("invalid interval: {0}")]
    Validation(#[from] ValidationError),
    #[error("interval cannot be changed while the timer is running")]
    ConfigLocked,
}

/// State machine of the timer screen: `Idle` with an editable minutes field,
/// or `Running` with the field locked and the countdown ticking.
pub struct TimerController {
    minutes_input: String,
    engine: CountdownEngine,
    scheduler: TickScheduler,
    run: Option<RunId>,
    alerts: AlertDispatcher,
}

impl TimerController {
    pub fn new(
        default_minutes: Minutes,
        scheduler: TickScheduler,
        alerts: AlertDispatcher,
    ) -> Self {
        Self {
            minutes_input: default_minutes.to_string(),
            engine: CountdownEngine::new(),
            scheduler,
            run: None,
            alerts,
        }
    }

    pub fn minutes_input(&self) -> &str {
        &self.minutes_input
    }

    pub fn edit_minutes(&mut self, text: impl Into<String>) -> Result<(), ControllerError> {
        if self.engine.is_running() {
            return Err(ControllerError::ConfigLocked);
        }
        self.minutes_input = text.into();
        trace!(input = %self.minutes_input, "minutes field edited");
        Ok(())
    }

    /// `Idle -> Running`, guarded by the minutes field parsing to a positive
    /// integer. A rejected start changes nothing.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        if self.engine.is_running() {
            debug!("start ignored; already running");
            return Ok(());
        }
        let minutes = parse_minutes(&self.minutes_input)?;
        let run = self.scheduler.schedule();
        self.run = Some(run);
        self.engine.start(minutes.cycle());
        info!(%minutes, run, remaining = self.engine.remaining(), "timer started");
        Ok(())
    }

    /// `Running -> Idle`. Returns whether the timer was running.
    pub fn stop(&mut self) -> bool {
        self.scheduler.cancel();
        self.run = None;
        let was_running = self.engine.stop();
        if was_running {
            info!("timer stopped");
        }
        was_running
    }

    pub fn on_tick(&mut self, tick: TickEvent) -> TickOutcome {
        if self.run != Some(tick.run) {
            trace!(run = tick.run, active = ?self.run, "stale tick ignored");
            return TickOutcome::Skipped;
        }
        let reload = self.configured_cycle();
        let outcome = self.engine.tick(reload);
        match outcome {
            TickOutcome::Restarted(next) => {
                debug!(next, "zero-crossing; restarting cycle");
                self.alerts.fire();
            }
            TickOutcome::Decremented(remaining) => trace!(remaining, "tick"),
            TickOutcome::Skipped => {}
        }
        outcome
    }

    /// The interval the next cycle will use. The field is locked while
    /// running, so this is normally the cycle captured at start.
    fn configured_cycle(&self) -> NonZeroU64 {
        parse_minutes(&self.minutes_input)
            .map(Minutes::cycle)
            .ok()
            .or_else(|| NonZeroU64::new(self.engine.cycle_seconds()))
            .unwrap_or(NonZeroU64::MIN)
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.engine.remaining()
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.run
    }

    pub fn ticker_active(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn alerts(&self) -> &AlertDispatcher {
        &self.alerts
    }

    pub fn view(&self) -> ScreenView {
        match self.engine.state() {
            TimerState::Idle => ScreenView::Idle {
                minutes_input: self.minutes_input.clone(),
            },
            TimerState::Running => ScreenView::Running {
                remaining: self.engine.remaining(),
            },
        }
    }

    /// Screen teardown: cancels the ticker and releases alert resources.
    pub async fn shutdown(&mut self) {
        self.stop();
        self.alerts.shutdown().await;
        debug!("timer controller shut down");
    }
}
