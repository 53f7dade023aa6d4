use tracing::{debug, info, warn};

use crate::AppError;
use crate::alert::AlertContent;
use crate::platform::NotificationPermission;

const APP_NAME: &str = "Interval Timer";
const ALERT_SOUND_NAME: &str = "complete";

#[derive(Debug)]
pub struct Notifier {
    shown: u64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let s = Self { shown: 0 };
        debug!("Linux Notifier created");
        s
    }

    pub async fn show(&mut self, content: &AlertContent) -> Result<(), AppError> {
        debug!(title = content.title, "show: building notification");
        let mut n = notify_rust::Notification::new();
        n.appname(APP_NAME)
            .summary(content.title)
            .body(content.body)
            .urgency(notify_rust::Urgency::Normal);
        if content.sound {
            n.sound_name(ALERT_SOUND_NAME);
        }

        match n.show_async().await {
            Ok(handle) => {
                self.shown += 1;
                debug!(shown = self.shown, id = handle.id(), "show: notification shown");
                Ok(())
            }
            Err(e) => Err(AppError::Notification(e.to_string())),
        }
    }
}

/// Desktop notifications need no grant on Linux; what matters is whether a
/// notification server answers on the session bus.
pub async fn probe_server() -> NotificationPermission {
    let caps = tokio::task::spawn_blocking(notify_rust::get_capabilities).await;
    match caps {
        Ok(Ok(caps)) => {
            info!(capabilities=?caps, "notification server available");
            NotificationPermission::Granted
        }
        Ok(Err(e)) => {
            warn!(error=%e, "notification server unavailable");
            NotificationPermission::Denied
        }
        Err(e) => {
            warn!(error=%e, "notification probe panicked");
            NotificationPermission::Denied
        }
    }
}
