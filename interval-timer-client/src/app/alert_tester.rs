use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::AppError;
use crate::alert::AlertDispatcher;
use crate::app::session;
use crate::audio::{AudioBackend, RodioBackend};
use crate::config::ClientConfig;
use crate::platform::{NotificationPermission, Platform};

/// Fires one alert outside the timer loop so users can check that
/// notifications and sound reach them.
pub async fn run(
    cfg: ClientConfig,
    plat: Arc<dyn Platform>,
    hold_secs: u64,
) -> Result<(), AppError> {
    info!("alert tester starting");

    let audio: Option<Arc<dyn AudioBackend>> = if cfg.sound {
        Some(Arc::new(RodioBackend::new()))
    } else {
        None
    };
    let setup = session::initialize(plat.as_ref(), audio.as_ref(), &cfg).await;
    let has_audio = audio.is_some();

    let mut alerts = AlertDispatcher::new(plat, setup.permission, audio);
    alerts.fire();
    alerts.flush().await;
    let playing = alerts.has_loaded_sound().await;
    if playing && hold_secs > 0 {
        info!(hold_secs, "holding so the alert sound can play");
        tokio::time::sleep(Duration::from_secs(hold_secs)).await;
    }
    alerts.shutdown().await;

    println!("Notification permission: {}", setup.permission);
    if let Some(advisory) = &setup.advisory {
        println!("  {}: {}", advisory.title, advisory.message);
    }
    println!(
        "Notification: {}",
        match setup.permission {
            NotificationPermission::Granted => "sent (check your desktop)",
            NotificationPermission::Denied => "skipped, permission denied",
            NotificationPermission::Unsupported => "skipped",
        }
    );
    println!("Audio session: {}", if setup.audio_ready { "ready" } else { "unavailable" });
    println!(
        "Sound: {}",
        match (has_audio, playing) {
            (false, _) => "disabled",
            (true, true) => "played",
            (true, false) => "failed (see log for details)",
        }
    );

    info!("alert tester finished");
    Ok(())
}
