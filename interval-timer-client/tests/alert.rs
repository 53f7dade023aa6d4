mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeAudio, FakePlatform, dispatcher};
use interval_timer_client::alert::{ALERT_BODY, ALERT_SOUND_URL, ALERT_TITLE, AlertContent};
use interval_timer_client::platform::NotificationPermission;

#[test]
fn alert_content_is_fixed() {
    let content = AlertContent::INTERVAL_COMPLETE;
    assert_eq!(content.title, ALERT_TITLE);
    assert_eq!(content.body, ALERT_BODY);
    assert!(content.sound);
    assert!(ALERT_SOUND_URL.starts_with("https://"));
}

#[tokio::test]
async fn fire_sends_notification_and_sound() {
    let platform = Arc::new(FakePlatform::granted());
    let audio = Arc::new(FakeAudio::default());
    let mut alerts = dispatcher(&platform, Some(&audio));
    assert!(alerts.notifications_enabled());

    alerts.fire();
    alerts.flush().await;
    assert_eq!(alerts.alerts_fired(), 1);
    assert_eq!(platform.notified(), 1);
    assert_eq!(audio.loads(), 1);
    assert!(alerts.has_loaded_sound().await);

    alerts.shutdown().await;
    assert_eq!(audio.releases(), 1);
}

#[tokio::test]
async fn notification_skipped_without_permission() {
    for permission in [
        NotificationPermission::Denied,
        NotificationPermission::Unsupported,
    ] {
        let platform = Arc::new(FakePlatform::with_permission(permission));
        let audio = Arc::new(FakeAudio::default());
        let mut alerts = dispatcher(&platform, Some(&audio));
        assert!(!alerts.notifications_enabled());

        alerts.fire();
        alerts.flush().await;
        assert_eq!(platform.notified(), 0);
        assert_eq!(audio.loads(), 1);
        alerts.shutdown().await;
    }
}

#[tokio::test]
async fn sound_skipped_when_disabled() {
    let platform = Arc::new(FakePlatform::granted());
    let mut alerts = dispatcher(&platform, None);
    alerts.fire();
    alerts.flush().await;
    assert_eq!(platform.notified(), 1);
    assert!(!alerts.has_loaded_sound().await);
    alerts.shutdown().await;
}

#[tokio::test]
async fn dispatcher_accepts_more_alerts_after_flush() {
    let platform = Arc::new(FakePlatform::granted());
    let audio = Arc::new(FakeAudio::default());
    let mut alerts = dispatcher(&platform, Some(&audio));
    for expected in 1..=3 {
        alerts.fire();
        alerts.flush().await;
        assert_eq!(platform.notified(), expected);
        assert_eq!(audio.loads(), expected);
        assert_eq!(audio.releases(), expected - 1);
    }
    alerts.shutdown().await;
    assert_eq!(audio.releases(), 3);
}

#[tokio::test(start_paused = true)]
async fn overlapping_alerts_keep_only_latest_sound() {
    let platform = Arc::new(FakePlatform::granted());
    let audio = Arc::new(FakeAudio::slow(Duration::from_secs(2)));
    let mut alerts = dispatcher(&platform, Some(&audio));

    alerts.fire();
    tokio::time::sleep(Duration::from_secs(1)).await;
    alerts.fire();
    alerts.flush().await;

    assert_eq!(alerts.alerts_fired(), 2);
    assert_eq!(audio.loads(), 2);
    assert_eq!(audio.releases(), 1);
    assert!(alerts.has_loaded_sound().await);

    alerts.shutdown().await;
    assert_eq!(audio.releases(), 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_sound() {
    let platform = Arc::new(FakePlatform::denied());
    let audio = Arc::new(FakeAudio::slow(Duration::from_secs(30)));
    let mut alerts = dispatcher(&platform, Some(&audio));

    alerts.fire();
    tokio::task::yield_now().await;
    assert_eq!(audio.loads(), 1);

    alerts.shutdown().await;
    assert!(!alerts.has_loaded_sound().await);
    // the load never finished, so there was nothing to release
    assert_eq!(audio.releases(), 0);
}

#[tokio::test]
async fn failures_are_swallowed() {
    let platform = Arc::new(FakePlatform::failing());
    let audio = Arc::new(FakeAudio::failing());
    let mut alerts = dispatcher(&platform, Some(&audio));
    alerts.fire();
    alerts.fire();
    alerts.flush().await;
    assert_eq!(alerts.alerts_fired(), 2);
    assert_eq!(platform.notified(), 2);
    assert_eq!(audio.loads(), 2);
    assert!(!alerts.has_loaded_sound().await);
    alerts.shutdown().await;
}
