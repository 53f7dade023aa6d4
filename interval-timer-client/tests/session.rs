mod common;

use std::sync::Arc;

use common::{FakeAudio, FakePlatform};
use interval_timer_client::app::{Advisory, initialize};
use interval_timer_client::audio::AudioBackend;
use interval_timer_client::config::ClientConfig;
use interval_timer_client::platform::NotificationPermission;

fn backend(audio: &Arc<FakeAudio>) -> Arc<dyn AudioBackend> {
    audio.clone()
}

#[tokio::test]
async fn granted_permission_needs_no_advisory() {
    let platform = FakePlatform::granted();
    let audio = Arc::new(FakeAudio::default());
    let setup = initialize(&platform, Some(&backend(&audio)), &ClientConfig::default()).await;
    assert_eq!(setup.permission, NotificationPermission::Granted);
    assert_eq!(setup.advisory, None);
    assert!(setup.audio_ready);
    assert_eq!(platform.asked(), 1);
    assert_eq!(audio.configured(), 1);
}

#[tokio::test]
async fn denied_permission_returns_advisory() {
    let platform = FakePlatform::denied();
    let audio = Arc::new(FakeAudio::default());
    let setup = initialize(&platform, Some(&backend(&audio)), &ClientConfig::default()).await;
    assert_eq!(setup.permission, NotificationPermission::Denied);
    assert_eq!(setup.advisory, Some(Advisory::permission_needed()));
    // timer use is not blocked; audio still configured
    assert!(setup.audio_ready);
}

#[tokio::test]
async fn disabled_notifications_are_not_requested() {
    let platform = FakePlatform::granted();
    let cfg = ClientConfig {
        notifications: false,
        sound: false,
        ..ClientConfig::default()
    };
    let setup = initialize(&platform, None, &cfg).await;
    assert_eq!(setup.permission, NotificationPermission::Unsupported);
    assert_eq!(setup.advisory, None);
    assert!(!setup.audio_ready);
    assert_eq!(platform.asked(), 0);
}

#[tokio::test]
async fn unsupported_platform_skips_request() {
    let platform = FakePlatform::unsupported();
    let setup = initialize(&platform, None, &ClientConfig::default()).await;
    assert_eq!(setup.permission, NotificationPermission::Unsupported);
    assert_eq!(platform.asked(), 0);
}

#[tokio::test]
async fn audio_setup_failure_is_not_fatal() {
    let platform = FakePlatform::granted();
    let audio = Arc::new(FakeAudio::no_output_device());
    let setup = initialize(&platform, Some(&backend(&audio)), &ClientConfig::default()).await;
    assert!(!setup.audio_ready);
    assert_eq!(setup.permission, NotificationPermission::Granted);
    assert_eq!(audio.configured(), 1);
}
