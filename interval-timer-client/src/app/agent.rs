use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::AppError;
use crate::alert::AlertDispatcher;
use crate::app::controller::{ControllerError, TimerController};
use crate::app::screen::{Advisory, Input, Screen};
use crate::app::session;
use crate::audio::{AudioBackend, RodioBackend};
use crate::config::ClientConfig;
use crate::platform::Platform;
use crate::scheduler::{TICK_PERIOD, TickEvent, TickScheduler};

/// Lines typed by the user, as delivered by the input reader.
pub type InputLines = mpsc::UnboundedReceiver<io::Result<String>>;

/// Entry point for the interactive timer screen.
pub async fn run(cfg: ClientConfig, plat: Arc<dyn Platform>) -> Result<(), AppError> {
    let audio: Option<Arc<dyn AudioBackend>> = if cfg.sound {
        Some(Arc::new(RodioBackend::new()))
    } else {
        None
    };
    let setup = session::initialize(plat.as_ref(), audio.as_ref(), &cfg).await;

    let (scheduler, mut ticks) = TickScheduler::new(TICK_PERIOD);
    let alerts = AlertDispatcher::new(plat, setup.permission, audio);
    let mut controller = TimerController::new(cfg.default_minutes, scheduler, alerts);

    let mut screen = Screen::new(io::stdout());
    if let Some(advisory) = setup.advisory {
        screen.show_advisory(advisory);
    }

    let mut input = spawn_stdin_reader()?;
    let result = drive(
        &mut controller,
        &mut ticks,
        &mut input,
        &mut screen,
        shutdown_signal(),
    )
    .await;
    info!(alerts = controller.alerts().alerts_fired(), "timer closed");
    result
}

/// Runs the screen until input ends, the user quits or `shutdown` resolves.
/// The controller is torn down on every exit path.
pub async fn drive<W, S>(
    controller: &mut TimerController,
    ticks: &mut mpsc::UnboundedReceiver<TickEvent>,
    input: &mut InputLines,
    screen: &mut Screen<W>,
    shutdown: S,
) -> Result<(), AppError>
where
    W: Write,
    S: Future<Output = ()>,
{
    let result = event_loop(controller, ticks, input, screen, shutdown).await;
    controller.shutdown().await;
    result
}

async fn event_loop<W, S>(
    controller: &mut TimerController,
    ticks: &mut mpsc::UnboundedReceiver<TickEvent>,
    input: &mut InputLines,
    screen: &mut Screen<W>,
    shutdown: S,
) -> Result<(), AppError>
where
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    screen.render(&controller.view())?;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received; closing timer");
                return Ok(());
            }
            line = input.recv() => {
                let line = match line {
                    Some(Ok(line)) => line,
                    Some(Err(e)) => return Err(AppError::Io(e)),
                    None => {
                        info!("input closed; closing timer");
                        return Ok(());
                    }
                };
                screen.dismiss_advisory();
                match handle_input(controller, Input::parse(&line)) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => {
                        info!("quit requested");
                        return Ok(());
                    }
                    Err(advisory) => screen.show_advisory(advisory),
                }
            }
            Some(tick) = ticks.recv() => {
                controller.on_tick(tick);
            }
        }
        screen.render(&controller.view())?;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one input to the controller. Rejected actions come back as the
/// dialog to show.
pub fn handle_input(controller: &mut TimerController, input: Input) -> Result<Flow, Advisory> {
    let running = controller.state().is_running();
    match input {
        Input::Quit => return Ok(Flow::Quit),
        Input::Press if running => {
            controller.stop();
        }
        Input::Press | Input::Start => start(controller)?,
        Input::Stop => {
            if !controller.stop() {
                debug!("stop ignored; timer idle");
            }
        }
        Input::Edit(text) => controller
            .edit_minutes(text)
            .map_err(|_| Advisory::interval_locked())?,
    }
    Ok(Flow::Continue)
}

fn start(controller: &mut TimerController) -> Result<(), Advisory> {
    match controller.start() {
        Ok(()) => Ok(()),
        Err(ControllerError::Validation(e)) => {
            info!(error=%e, input = controller.minutes_input(), "start rejected");
            Err(Advisory::invalid_input())
        }
        Err(ControllerError::ConfigLocked) => Err(Advisory::interval_locked()),
    }
}

/// Reads stdin on its own thread. A blocking read cannot be cancelled, so
/// the thread is detached and never joined at exit.
fn spawn_stdin_reader() -> Result<InputLines, AppError> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
            debug!("stdin reader finished");
        })?;
    Ok(rx)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let (mut sigint, mut sigterm) = match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(int), Ok(term)) => (int, term),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error=%e, "could not listen for shutdown signals");
                return std::future::pending().await;
            }
        };
        tokio::select! {
            _ = sigint.recv() => {
                info!("shutdown: received SIGINT");
            }
            _ = sigterm.recv() => {
                info!("shutdown: received SIGTERM");
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error=%e, "could not listen for ctrl_c");
            return std::future::pending().await;
        }
        info!("shutdown: received ctrl_c");
    }
}
