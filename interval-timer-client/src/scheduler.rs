use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one scheduled run of the ticker.
pub type RunId = u64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickEvent {
    pub run: RunId,
}

struct ActiveTicker {
    run: RunId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Recurring tick source with a single cancel handle.
///
/// Ticks are delivered over a channel so the owner applies them on its own
/// event loop, one at a time. Events from a cancelled run keep their old
/// [`RunId`] and must be discarded by the receiver.
pub struct TickScheduler {
    period: Duration,
    tx: mpsc::UnboundedSender<TickEvent>,
    next_run: RunId,
    active: Option<ActiveTicker>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            period,
            tx,
            next_run: 0,
            active: None,
        };
        (scheduler, rx)
    }

    /// Starts a fresh ticker, cancelling any previous one.
    pub fn schedule(&mut self) -> RunId {
        self.cancel();
        self.next_run += 1;
        let run = self.next_run;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let tx = self.tx.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => { break; }
                    _ = ticks.tick() => {
                        if tx.send(TickEvent { run }).is_err() {
                            debug!(run, "ticker: receiver gone; exiting");
                            break;
                        }
                        trace!(run, "ticker: tick sent");
                    }
                }
            }
        });

        debug!(run, period_ms = period.as_millis() as u64, "ticker scheduled");
        self.active = Some(ActiveTicker {
            run,
            cancel,
            handle,
        });
        run
    }

    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.handle.abort();
            debug!(run = active.run, "ticker cancelled");
        }
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active.as_ref().map(|a| a.run)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
