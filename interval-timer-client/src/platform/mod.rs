#[cfg(not(target_os = "windows"))]
pub mod linux;
#[cfg(target_os = "windows")]
pub mod windows;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::AppError;
use crate::alert::AlertContent;

/// Outcome of asking the OS whether we may show notifications.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// Not asked: disabled by the user or not available on this platform.
    Unsupported,
}

impl fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationPermission::Granted => f.write_str("granted"),
            NotificationPermission::Denied => f.write_str("denied"),
            NotificationPermission::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Cross-platform interface for the OS notification service.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Process-level setup performed once before anything else runs.
    fn initialize_process(&self) {}

    fn supports_notifications(&self) -> bool;

    async fn request_notification_permission(&self) -> NotificationPermission;

    /// Shows an immediate local notification.
    async fn notify(&self, content: &AlertContent) -> Result<(), AppError>;
}

/// Detect the current platform and return an implementation.
pub fn detect() -> Arc<dyn Platform> {
    #[cfg(target_os = "windows")]
    let platform = Arc::new(windows::WindowsPlatform::new());
    #[cfg(not(target_os = "windows"))]
    let platform = Arc::new(linux::LinuxPlatform::new());
    platform
}
