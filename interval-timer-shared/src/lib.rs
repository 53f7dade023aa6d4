pub mod countdown;
pub mod domain;

pub use countdown::{CountdownEngine, TickOutcome};
pub use domain::{
    DEFAULT_MINUTES, Minutes, SECONDS_PER_MINUTE, TimerState, ValidationError, format_time,
    parse_minutes,
};
