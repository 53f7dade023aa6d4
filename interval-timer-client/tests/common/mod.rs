#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use interval_timer_client::AppError;
use interval_timer_client::alert::{AlertContent, AlertDispatcher};
use interval_timer_client::app::TimerController;
use interval_timer_client::audio::{AudioBackend, AudioHandle, AudioSession, Playback};
use interval_timer_client::platform::{NotificationPermission, Platform};
use interval_timer_client::scheduler::{TICK_PERIOD, TickEvent, TickScheduler};
use interval_timer_shared::DEFAULT_MINUTES;
use tokio::sync::mpsc::UnboundedReceiver;

pub struct FakePlatform {
    pub permission: NotificationPermission,
    pub supported: bool,
    pub fail_notify: bool,
    asked: AtomicUsize,
    notified: AtomicUsize,
}

impl FakePlatform {
    pub fn granted() -> Self {
        Self::with_permission(NotificationPermission::Granted)
    }

    pub fn denied() -> Self {
        Self::with_permission(NotificationPermission::Denied)
    }

    pub fn with_permission(permission: NotificationPermission) -> Self {
        Self {
            permission,
            supported: true,
            fail_notify: false,
            asked: AtomicUsize::new(0),
            notified: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_notify: true,
            ..Self::granted()
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::granted()
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }

    pub fn notified(&self) -> usize {
        self.notified.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Platform for FakePlatform {
    fn supports_notifications(&self) -> bool {
        self.supported
    }

    async fn request_notification_permission(&self) -> NotificationPermission {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.permission
    }

    async fn notify(&self, content: &AlertContent) -> Result<(), AppError> {
        assert_eq!(content.title, "Timer Alert");
        assert_eq!(content.body, "Your interval has completed!");
        assert!(content.sound);
        self.notified.fetch_add(1, Ordering::SeqCst);
        if self.fail_notify {
            return Err(AppError::Notification("notification service offline".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAudio {
    pub fail_load: bool,
    pub fail_configure: bool,
    pub load_delay: Option<Duration>,
    configured: AtomicUsize,
    loads: AtomicUsize,
    releases: Arc<AtomicUsize>,
}

impl FakeAudio {
    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn no_output_device() -> Self {
        Self {
            fail_configure: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            load_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn configured(&self) -> usize {
        self.configured.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

struct FakePlayback {
    releases: Arc<AtomicUsize>,
}

impl Playback for FakePlayback {
    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AudioBackend for FakeAudio {
    async fn configure(&self, session: AudioSession) -> Result<(), AppError> {
        assert!(session.plays_in_silent_mode);
        assert!(session.stays_active_in_background);
        self.configured.fetch_add(1, Ordering::SeqCst);
        if self.fail_configure {
            return Err(AppError::Audio("no output device".into()));
        }
        Ok(())
    }

    async fn load_and_play(&self, url: &str) -> Result<AudioHandle, AppError> {
        assert!(url.ends_with(".mp3"), "{url}");
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_load {
            return Err(AppError::Http("fetch failed".into()));
        }
        Ok(AudioHandle::new(FakePlayback {
            releases: self.releases.clone(),
        }))
    }
}

pub fn dispatcher(
    platform: &Arc<FakePlatform>,
    audio: Option<&Arc<FakeAudio>>,
) -> AlertDispatcher {
    let audio = audio.map(|a| a.clone() as Arc<dyn AudioBackend>);
    AlertDispatcher::new(platform.clone(), platform.permission, audio)
}

pub fn controller(
    platform: &Arc<FakePlatform>,
    audio: Option<&Arc<FakeAudio>>,
) -> (TimerController, UnboundedReceiver<TickEvent>) {
    let (scheduler, ticks) = TickScheduler::new(TICK_PERIOD);
    let alerts = dispatcher(platform, audio);
    let controller = TimerController::new(DEFAULT_MINUTES, scheduler, alerts);
    (controller, ticks)
}

/// Receives and applies `n` ticks from the real scheduler.
pub async fn run_ticks(
    controller: &mut TimerController,
    ticks: &mut UnboundedReceiver<TickEvent>,
    n: usize,
) {
    for _ in 0..n {
        let tick = ticks.recv().await.expect("ticker stopped early");
        controller.on_tick(tick);
    }
}
