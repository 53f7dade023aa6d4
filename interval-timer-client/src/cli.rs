use std::path::PathBuf;

use clap::{Parser, Subcommand};
use interval_timer_shared::Minutes;

use crate::config::ClientConfig;

const HELP_EPILOG: &str = r#"Config resolution order:
  1) --config/-c PATH
  2) $INTERVAL_TIMER_CONFIG
  3) platform default, e.g. ~/.config/interval-timer/client.yaml

Screen controls:
  <number>   set the interval in minutes (only while stopped)
  <enter>    press the visible Start/Stop button
  start      start the countdown
  stop       stop the countdown
  quit       leave the timer
"#;

#[derive(Debug, Parser)]
#[command(
    name = "interval-timer",
    version,
    about = "Repeating interval timer with desktop notification and sound alerts",
    long_about = None,
    after_long_help = HELP_EPILOG,
)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Interval pre-filled in the minutes field (overrides config)
    #[arg(short, long)]
    pub minutes: Option<Minutes>,
    /// Do not play the alert sound
    #[arg(long)]
    pub no_sound: bool,
    /// Do not show desktop notifications
    #[arg(long)]
    pub no_notifications: bool,
    /// Optional subcommand. Without one, opens the timer screen.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn apply_overrides(&self, cfg: &mut ClientConfig) {
        if let Some(minutes) = self.minutes {
            cfg.default_minutes = minutes;
        }
        if self.no_sound {
            cfg.sound = false;
        }
        if self.no_notifications {
            cfg.notifications = false;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Fire a single alert and report whether notification and sound worked
    TestAlert {
        /// Seconds to keep the process alive so the sound can play
        #[arg(long, default_value_t = 5)]
        hold_secs: u64,
    },
}
