use tauri_winrt_notification::{Duration, Sound, Toast};
use tracing::debug;

use crate::AppError;
use crate::alert::AlertContent;

#[derive(Debug, Default)]
pub struct Notifier {
    shown: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn show(&mut self, content: &AlertContent) -> Result<(), AppError> {
        let title = content.title.to_string();
        let body = content.body.to_string();
        let sound = content.sound.then_some(Sound::Default);
        let res = tokio::task::spawn_blocking(move || {
            Toast::new(Toast::POWERSHELL_APP_ID)
                .title(&title)
                .text1(&body)
                .sound(sound)
                .duration(Duration::Short)
                .show()
                .map_err(|e| AppError::Notification(e.to_string()))
        })
        .await
        .map_err(|e| AppError::Notification(format!("toast task failed: {e}")))?;
        res?;
        self.shown += 1;
        debug!(shown = self.shown, "toast shown");
        Ok(())
    }
}
