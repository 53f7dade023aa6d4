//! Audio service for alert sounds.
//!
//! The alert asset is fetched over HTTP and played with rodio on a
//! dedicated thread, since rodio output streams cannot cross threads.

use std::io::Cursor;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use url::Url;

use crate::AppError;

const PLAYBACK_POLL: Duration = Duration::from_millis(50);

/// Session behaviour requested once at startup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioSession {
    pub plays_in_silent_mode: bool,
    pub stays_active_in_background: bool,
}

impl AudioSession {
    pub const ALERTS: AudioSession = AudioSession {
        plays_in_silent_mode: true,
        stays_active_in_background: true,
    };
}

/// A sound that has been loaded and may still be playing.
pub trait Playback: Send {
    /// Stops playback and frees the underlying resources.
    fn release(&mut self);
}

/// Owns exactly one loaded sound. Releasing or dropping it stops playback.
pub struct AudioHandle {
    playback: Option<Box<dyn Playback>>,
}

impl AudioHandle {
    pub fn new(playback: impl Playback + 'static) -> Self {
        Self {
            playback: Some(Box::new(playback)),
        }
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.release();
        }
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("loaded", &self.playback.is_some())
            .finish()
    }
}

#[async_trait]
pub trait AudioBackend: Send + Sync {
    async fn configure(&self, session: AudioSession) -> Result<(), AppError>;
    async fn load_and_play(&self, url: &str) -> Result<AudioHandle, AppError>;
}

/// Default backend: reqwest download plus rodio playback.
pub struct RodioBackend {
    http: reqwest::Client,
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioBackend {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, AppError> {
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("fetch {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Http(format!("fetch {url} failed: {e}")))?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AppError::Http(format!("read {url} failed: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioBackend for RodioBackend {
    async fn configure(&self, session: AudioSession) -> Result<(), AppError> {
        // A terminal process keeps playing when unfocused and has no mute
        // switch to bypass; the remaining check is that an output exists.
        let probe = tokio::task::spawn_blocking(|| {
            rodio::OutputStream::try_default()
                .map(|_| ())
                .map_err(|e| AppError::Audio(format!("no audio output device: {e}")))
        })
        .await
        .map_err(|e| AppError::Audio(format!("audio probe panicked: {e}")))?;
        probe?;
        info!(
            silent_mode = session.plays_in_silent_mode,
            background = session.stays_active_in_background,
            "audio session configured"
        );
        Ok(())
    }

    async fn load_and_play(&self, url: &str) -> Result<AudioHandle, AppError> {
        let url = Url::parse(url)
            .map_err(|e| AppError::Http(format!("invalid sound URL {url:?}: {e}")))?;
        let bytes = self.fetch(&url).await?;
        debug!(%url, len = bytes.len(), "alert sound downloaded");

        let (ready_tx, ready_rx) = oneshot::channel();
        let (stop_tx, stop_rx) = std_mpsc::channel();
        std::thread::Builder::new()
            .name("alert-sound".into())
            .spawn(move || play_blocking(bytes, ready_tx, stop_rx))?;

        ready_rx
            .await
            .map_err(|_| AppError::Audio("playback thread exited before starting".into()))??;
        Ok(AudioHandle::new(RodioPlayback {
            stop: Some(stop_tx),
        }))
    }
}

struct RodioPlayback {
    stop: Option<std_mpsc::Sender<()>>,
}

impl Playback for RodioPlayback {
    fn release(&mut self) {
        // dropping the sender also wakes the playback thread
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

fn play_blocking(
    bytes: Vec<u8>,
    ready: oneshot::Sender<Result<(), AppError>>,
    stop: std_mpsc::Receiver<()>,
) {
    use rodio::{Decoder, OutputStream, Sink};

    let (_stream, stream_handle) = match OutputStream::try_default() {
        Ok(v) => v,
        Err(e) => {
            let _ = ready.send(Err(AppError::Audio(format!("no audio output device: {e}"))));
            return;
        }
    };
    let source = match Decoder::new(Cursor::new(bytes)) {
        Ok(s) => s,
        Err(e) => {
            let _ = ready.send(Err(AppError::Audio(format!("decode failed: {e}"))));
            return;
        }
    };
    let sink = match Sink::try_new(&stream_handle) {
        Ok(s) => s,
        Err(e) => {
            let _ = ready.send(Err(AppError::Audio(format!("sink failed: {e}"))));
            return;
        }
    };
    sink.append(source);
    if ready.send(Ok(())).is_err() {
        warn!("alert sound requester went away; stopping playback");
        sink.stop();
        return;
    }

    while !sink.empty() {
        match stop.recv_timeout(PLAYBACK_POLL) {
            Ok(()) | Err(std_mpsc::RecvTimeoutError::Disconnected) => {
                sink.stop();
                debug!("alert sound released");
                return;
            }
            Err(std_mpsc::RecvTimeoutError::Timeout) => {}
        }
    }
    debug!("alert sound finished");
}
