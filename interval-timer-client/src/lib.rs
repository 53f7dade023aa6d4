use std::path::Path;

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

pub mod alert;
pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod platform;
pub mod scheduler;

pub use cli::{Cli, Command};
pub use config::{ClientConfig, load_config, resolve_config_path};

const LOG_FILE_PREFIX: &str = "interval-timer.log";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("audio error: {0}")]
    Audio(String),
    #[error("notification error: {0}")]
    Notification(String),
}

/// Opens the daily-rolled log file in `dir`, creating the directory.
pub fn open_log_appender(dir: &Path) -> Result<RollingFileAppender, AppError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
        .map_err(|e| AppError::Config(format!("log directory {}: {e}", dir.display())))
}

/// Stdout belongs to the timer screen, so logs go to a daily file when a
/// log directory is usable and to stderr otherwise.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let appender = log_dir.map(open_log_appender);
    let appender_err = match appender {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .compact()
                .init();
            return Some(guard);
        }
        Some(Err(e)) => Some(e),
        None => None,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    if let Some(e) = appender_err {
        warn!(error=%e, "log file unavailable; logging to stderr");
    }
    None
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(Command::InitConfig { force }) = &cli.command {
        let path = resolve_config_path(cli.config.clone())?;
        return config::write_default_config(&path, *force);
    }

    let (cfg_path, mut cfg) = ClientConfig::find_and_load(cli.config.clone())?;
    cli.apply_overrides(&mut cfg);

    // environment fixups must happen before the log writer thread starts
    let plat = platform::detect();
    plat.initialize_process();

    let log_dir = cfg.log_dir.clone().or_else(config::default_log_dir);
    let _guard = init_tracing(log_dir.as_deref());
    info!(path=?cfg_path, default_minutes=%cfg.default_minutes, "loaded config");
    #[cfg(target_os = "windows")]
    info!("platform selected: windows");
    #[cfg(not(target_os = "windows"))]
    info!("platform selected: linux");
    if !cfg.notifications && !cfg.sound {
        warn!("notifications and sound both disabled; alerts will only be logged");
    }

    match cli.command {
        Some(Command::TestAlert { hold_secs }) => {
            app::alert_tester::run(cfg, plat, hold_secs).await
        }
        Some(Command::InitConfig { .. }) | None => app::agent::run(cfg, plat).await,
    }
}
