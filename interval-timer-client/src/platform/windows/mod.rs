pub mod notify;

use tokio::sync::Mutex;

use super::{NotificationPermission, Platform};
use crate::AppError;
use crate::alert::AlertContent;

/// Windows implementation of the cross-platform interface.
pub struct WindowsPlatform {
    notifier: Mutex<notify::Notifier>,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            notifier: Mutex::new(notify::Notifier::new()),
        }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Platform for WindowsPlatform {
    fn supports_notifications(&self) -> bool {
        true
    }

    async fn request_notification_permission(&self) -> NotificationPermission {
        // Toasts from a desktop process need no runtime grant.
        NotificationPermission::Granted
    }

    async fn notify(&self, content: &AlertContent) -> Result<(), AppError> {
        self.notifier.lock().await.show(content).await
    }
}
