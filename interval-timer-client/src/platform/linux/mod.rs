pub mod notify;

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::{NotificationPermission, Platform};
use crate::AppError;
use crate::alert::AlertContent;

/// Linux implementation of the cross-platform interface.
pub struct LinuxPlatform {
    notifier: Mutex<notify::Notifier>, // single notifier instance
}

impl LinuxPlatform {
    pub fn new() -> Self {
        Self {
            notifier: Mutex::new(notify::Notifier::new()),
        }
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

/// Points the notification client at the user's session bus when the timer
/// is started from a console that did not export it.
pub fn ensure_console_dbus_env() {
    if std::env::var_os("DBUS_SESSION_BUS_ADDRESS").is_some() {
        return;
    }

    let Some(runtime_dir) = find_runtime_dir_with_bus() else {
        return;
    };

    export_runtime_dir(&runtime_dir);
    if let Some(addr) = build_bus_address(&runtime_dir) {
        // SAFETY: called before the log writer or any blocking-pool thread exists.
        unsafe {
            std::env::set_var("DBUS_SESSION_BUS_ADDRESS", addr);
        }
    }
}

fn find_runtime_dir_with_bus() -> Option<PathBuf> {
    runtime_dir_from_env()
        .and_then(runtime_dir_if_bus_exists)
        .or_else(|| runtime_dir_if_bus_exists(default_runtime_dir()))
}

fn runtime_dir_if_bus_exists(dir: PathBuf) -> Option<PathBuf> {
    dir.join("bus").exists().then_some(dir)
}

fn runtime_dir_from_env() -> Option<PathBuf> {
    std::env::var_os("XDG_RUNTIME_DIR").map(PathBuf::from)
}

fn default_runtime_dir() -> PathBuf {
    let uid = nix::unistd::geteuid().as_raw();
    PathBuf::from(format!("/run/user/{uid}"))
}

fn export_runtime_dir(runtime: &Path) {
    if std::env::var_os("XDG_RUNTIME_DIR").is_none() {
        // SAFETY: called before the log writer or any blocking-pool thread exists.
        unsafe {
            std::env::set_var("XDG_RUNTIME_DIR", runtime.as_os_str());
        }
    }
}

fn build_bus_address(runtime: &Path) -> Option<String> {
    let bus = runtime.join("bus");
    bus.exists().then(|| format!("unix:path={}", bus.display()))
}

#[async_trait::async_trait]
impl Platform for LinuxPlatform {
    fn initialize_process(&self) {
        ensure_console_dbus_env();
    }

    fn supports_notifications(&self) -> bool {
        true
    }

    async fn request_notification_permission(&self) -> NotificationPermission {
        notify::probe_server().await
    }

    async fn notify(&self, content: &AlertContent) -> Result<(), AppError> {
        self.notifier.lock().await.show(content).await
    }
}
