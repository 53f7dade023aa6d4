use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, AudioHandle};
use crate::platform::{NotificationPermission, Platform};

pub const ALERT_TITLE: &str = "Timer Alert";
pub const ALERT_BODY: &str = "Your interval has completed!";
pub const ALERT_SOUND_URL: &str =
    "https://assets.mixkit.co/active_storage/sfx/2869/2869-preview.mp3";

const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

/// Text and sound flag of the local notification shown on each alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertContent {
    pub title: &'static str,
    pub body: &'static str,
    pub sound: bool,
}

impl AlertContent {
    pub const INTERVAL_COMPLETE: AlertContent = AlertContent {
        title: ALERT_TITLE,
        body: ALERT_BODY,
        sound: true,
    };
}

/// Fires the notification and the sound for each completed interval.
///
/// Both halves run as independent background tasks so the countdown never
/// waits on them. Failures are logged and dropped.
pub struct AlertDispatcher {
    platform: Arc<dyn Platform>,
    notify: bool,
    audio: Option<Arc<dyn AudioBackend>>,
    sound_url: String,
    loaded: Arc<Mutex<Option<AudioHandle>>>,
    tasks: TaskTracker,
    cancel: CancellationToken,
    fired: u64,
}

impl AlertDispatcher {
    /// Notifications are only sent when `permission` is granted; sound is
    /// skipped when `audio` is `None`.
    pub fn new(
        platform: Arc<dyn Platform>,
        permission: NotificationPermission,
        audio: Option<Arc<dyn AudioBackend>>,
    ) -> Self {
        Self::with_sound_url(platform, permission, audio, ALERT_SOUND_URL)
    }

    pub fn with_sound_url(
        platform: Arc<dyn Platform>,
        permission: NotificationPermission,
        audio: Option<Arc<dyn AudioBackend>>,
        sound_url: impl Into<String>,
    ) -> Self {
        let notify = permission == NotificationPermission::Granted;
        debug!(%permission, notify, sound = audio.is_some(), "alert dispatcher created");
        Self {
            platform,
            notify,
            audio,
            sound_url: sound_url.into(),
            loaded: Arc::new(Mutex::new(None)),
            tasks: TaskTracker::new(),
            cancel: CancellationToken::new(),
            fired: 0,
        }
    }

    pub fn fire(&mut self) {
        self.fired += 1;
        let alert = self.fired;
        info!(alert, "interval complete; dispatching alert");

        if self.notify {
            let platform = self.platform.clone();
            let cancel = self.cancel.clone();
            self.tasks.spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(alert, "alert notification cancelled");
                    }
                    res = platform.notify(&AlertContent::INTERVAL_COMPLETE) => match res {
                        Ok(()) => debug!(alert, "alert notification shown"),
                        Err(e) => warn!(alert, error=%e, "alert notification failed"),
                    }
                }
            });
        } else {
            debug!(alert, "notifications unavailable; skipping notification");
        }

        if let Some(audio) = self.audio.clone() {
            let url = self.sound_url.clone();
            let loaded = self.loaded.clone();
            let cancel = self.cancel.clone();
            self.tasks.spawn(async move {
                let res = tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(alert, "alert sound cancelled");
                        return;
                    }
                    res = audio.load_and_play(&url) => res,
                };
                match res {
                    Ok(handle) => store_sound(&loaded, &cancel, handle, alert).await,
                    Err(e) => warn!(alert, error=%e, "alert sound failed"),
                }
            });
        }
    }

    pub fn alerts_fired(&self) -> u64 {
        self.fired
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notify
    }

    pub async fn has_loaded_sound(&self) -> bool {
        self.loaded.lock().await.is_some()
    }

    /// Waits for every alert task issued so far.
    pub async fn flush(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    /// Cancels pending alert work and releases the loaded sound.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tasks.close();
        if tokio::time::timeout(SHUTDOWN_GRACE, self.tasks.wait())
            .await
            .is_err()
        {
            warn!(pending = self.tasks.len(), "alert tasks still running after grace period");
        }
        if let Some(handle) = self.loaded.lock().await.take() {
            handle.release();
            debug!("released loaded alert sound");
        }
    }
}

async fn store_sound(
    loaded: &Mutex<Option<AudioHandle>>,
    cancel: &CancellationToken,
    handle: AudioHandle,
    alert: u64,
) {
    let mut slot = loaded.lock().await;
    if cancel.is_cancelled() {
        drop(slot);
        handle.release();
        debug!(alert, "alert sound loaded after shutdown; released");
        return;
    }
    if let Some(previous) = slot.replace(handle) {
        previous.release();
        debug!(alert, "released previous alert sound");
    }
    debug!(alert, "alert sound playing");
}
