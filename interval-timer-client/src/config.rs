use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use interval_timer_shared::{DEFAULT_MINUTES, Minutes};
use serde::{Deserialize, Serialize};

use crate::AppError;

pub const ENV_CONFIG: &str = "INTERVAL_TIMER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Value pre-filled in the minutes field.
    #[serde(default = "default_minutes")]
    pub default_minutes: Minutes,
    #[serde(default = "enabled")]
    pub notifications: bool,
    #[serde(default = "enabled")]
    pub sound: bool,
    /// Directory for the rolling log file. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            notifications: true,
            sound: true,
            log_dir: None,
        }
    }
}

fn default_minutes() -> Minutes {
    DEFAULT_MINUTES
}

fn enabled() -> bool {
    true
}

impl ClientConfig {
    /// Resolves the config path and loads it. A missing file is only an
    /// error when the path was given explicitly.
    pub fn find_and_load(cli_value: Option<PathBuf>) -> Result<(PathBuf, ClientConfig), AppError> {
        let explicit = cli_value.is_some() || std::env::var_os(ENV_CONFIG).is_some();
        let path = resolve_config_path(cli_value)?;
        if !explicit && !path.exists() {
            return Ok((path, ClientConfig::default()));
        }
        let cfg = load_config(&path)?;
        Ok((path, cfg))
    }
}

pub fn resolve_config_path(cli_value: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(p) = cli_value {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(ENV_CONFIG) {
        return Ok(PathBuf::from(p));
    }
    default_config_path().ok_or_else(|| AppError::Config("could not determine config dir".into()))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "interval-timer", "interval-timer")
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(project_dirs()?.config_dir().join("client.yaml"))
}

pub fn default_log_dir() -> Option<PathBuf> {
    Some(project_dirs()?.data_local_dir().join("logs"))
}

pub fn load_config(path: &Path) -> Result<ClientConfig, AppError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read {} failed: {e}", path.display())))?;
    parse_config(&data)
        .map_err(|e| AppError::Config(format!("parse {} failed: {e}", path.display())))
}

pub fn parse_config(data: &str) -> Result<ClientConfig, serde_yaml::Error> {
    if data.trim().is_empty() {
        return Ok(ClientConfig::default());
    }
    serde_yaml::from_str(data)
}

pub fn save_config(path: &Path, cfg: &ClientConfig) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let data = serde_yaml::to_string(cfg)
        .map_err(|e| AppError::Config(format!("serialize config failed: {e}")))?;
    std::fs::write(path, data)
        .map_err(|e| AppError::Config(format!("write {} failed: {e}", path.display())))
}

/// Writes the default config, refusing to clobber an existing file unless
/// `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), AppError> {
    if path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    save_config(path, &ClientConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
