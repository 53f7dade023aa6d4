//! Terminal rendition of the single timer screen.

use std::io::{self, Write};

use interval_timer_shared::format_time;

pub const TITLE: &str = "Interval Timer";
pub const FIELD_LABEL: &str = "Set interval (minutes)";
pub const RUNNING_LABEL: &str = "Running...";
pub const START_CONTROL: &str = "[ Start ]";
pub const STOP_CONTROL: &str = "[ Stop ]";

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";
const HINT: &str = "type minutes, <enter> to press the button, 'quit' to leave";

/// One line of user input, already mapped onto a screen action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Press whichever button is visible.
    Press,
    Start,
    Stop,
    Quit,
    /// Replace the minutes field with this text.
    Edit(String),
}

impl Input {
    pub fn parse(line: &str) -> Input {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Input::Press,
            "start" => Input::Start,
            "stop" => Input::Stop,
            "q" | "quit" | "exit" => Input::Quit,
            _ => Input::Edit(trimmed.to_string()),
        }
    }
}

/// Dialog shown above the screen until the next input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub title: &'static str,
    pub message: &'static str,
}

impl Advisory {
    pub fn invalid_input() -> Self {
        Self {
            title: "Invalid input",
            message: "Please enter a valid number of minutes",
        }
    }

    pub fn permission_needed() -> Self {
        Self {
            title: "Permission needed",
            message: "Please enable notifications",
        }
    }

    pub fn interval_locked() -> Self {
        Self {
            title: "Timer running",
            message: "Stop the timer to change the interval",
        }
    }
}

/// What the screen shows for the current controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Idle { minutes_input: String },
    Running { remaining: u64 },
}

impl ScreenView {
    /// Countdown text, only present while running.
    pub fn display(&self) -> Option<String> {
        match self {
            ScreenView::Idle { .. } => None,
            ScreenView::Running { remaining } => Some(format_time(*remaining)),
        }
    }

    pub fn status(&self) -> Option<&'static str> {
        match self {
            ScreenView::Idle { .. } => None,
            ScreenView::Running { .. } => Some(RUNNING_LABEL),
        }
    }

    pub fn control(&self) -> &'static str {
        match self {
            ScreenView::Idle { .. } => START_CONTROL,
            ScreenView::Running { .. } => STOP_CONTROL,
        }
    }

    pub fn lines(&self, advisory: Option<&Advisory>) -> Vec<String> {
        let mut lines = vec![TITLE.to_string(), String::new()];
        if let Some(a) = advisory {
            lines.push(format!("! {}: {}", a.title, a.message));
            lines.push(String::new());
        }
        match self {
            ScreenView::Idle { minutes_input } => {
                lines.push(FIELD_LABEL.to_string());
                lines.push(format!("> {minutes_input}"));
            }
            ScreenView::Running { remaining } => {
                lines.push(format!("  {}", format_time(*remaining)));
                lines.push(RUNNING_LABEL.to_string());
            }
        }
        lines.push(String::new());
        lines.push(self.control().to_string());
        lines
    }
}

pub struct Screen<W: Write> {
    out: W,
    advisory: Option<Advisory>,
    ansi: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            advisory: None,
            ansi: true,
        }
    }

    /// Plain output without escape sequences, for pipes and tests.
    pub fn plain(out: W) -> Self {
        Self {
            out,
            advisory: None,
            ansi: false,
        }
    }

    pub fn show_advisory(&mut self, advisory: Advisory) {
        self.advisory = Some(advisory);
    }

    pub fn dismiss_advisory(&mut self) {
        self.advisory = None;
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn render(&mut self, view: &ScreenView) -> io::Result<()> {
        if self.ansi {
            self.out.write_all(CLEAR_AND_HOME.as_bytes())?;
        }
        for line in view.lines(self.advisory.as_ref()) {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "({HINT})")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
