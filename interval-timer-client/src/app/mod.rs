pub mod agent;
pub mod alert_tester;
pub mod controller;
pub mod screen;
pub mod session;

pub use controller::{ControllerError, TimerController};
pub use screen::{Advisory, Input, Screen, ScreenView};
pub use session::{SessionSetup, initialize};
