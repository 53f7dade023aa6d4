use std::sync::Arc;

use tracing::{info, warn};

use crate::app::screen::Advisory;
use crate::audio::{AudioBackend, AudioSession};
use crate::config::ClientConfig;
use crate::platform::{NotificationPermission, Platform};

/// What startup learned about the alert services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetup {
    pub permission: NotificationPermission,
    /// Non-blocking message to show on the first screen, if any.
    pub advisory: Option<Advisory>,
    pub audio_ready: bool,
}

/// One-time setup of notification permission and the audio session.
///
/// Nothing here is fatal: a denied permission only produces an advisory and
/// a failed audio setup is logged. Neither is retried.
pub async fn initialize(
    platform: &dyn Platform,
    audio: Option<&Arc<dyn AudioBackend>>,
    cfg: &ClientConfig,
) -> SessionSetup {
    let permission = if !cfg.notifications {
        info!("notifications disabled by config");
        NotificationPermission::Unsupported
    } else if !platform.supports_notifications() {
        info!("notifications not supported on this platform");
        NotificationPermission::Unsupported
    } else {
        platform.request_notification_permission().await
    };
    info!(%permission, "notification permission resolved");

    let advisory = match permission {
        NotificationPermission::Denied => {
            warn!("notification permission denied; alerts will only play sound");
            Some(Advisory::permission_needed())
        }
        _ => None,
    };

    let audio_ready = match audio {
        Some(backend) => match backend.configure(AudioSession::ALERTS).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error=%e, "audio session setup failed; alert sounds may be silent");
                false
            }
        },
        None => {
            info!("alert sound disabled by config");
            false
        }
    };

    SessionSetup {
        permission,
        advisory,
        audio_ready,
    }
}
