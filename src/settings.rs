// src/settings.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::summary::DEFAULT_DUE_WINDOW_DAYS;

pub const SETTINGS_FILE: &str = "settings.json";
pub const CONFIG_FILE: &str = "config.txt";
pub const DEFAULT_WORKBOOK: &str = "SİPARİŞ LİSTESİ.xlsx";

const ENV_SECRET: &str = "ORDER_TRACKER_SECRET";
const ENV_CONFIG: &str = "ORDER_TRACKER_CONFIG";
const DEFAULT_SECRET: &str = "eurowatt54";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Text file holding a workbook path or a share link.
    pub config_file: PathBuf,
    /// Used when the config file is missing or unusable.
    pub default_workbook: PathBuf,
    pub access_secret: String,
    pub cache_ttl_secs: u64,
    pub due_window_days: i64,
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(CONFIG_FILE),
            default_workbook: PathBuf::from(DEFAULT_WORKBOOK),
            access_secret: DEFAULT_SECRET.to_string(),
            cache_ttl_secs: 60,
            due_window_days: DEFAULT_DUE_WINDOW_DAYS,
            request_timeout_secs: 30,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let mut settings = Self::from_file(Path::new(SETTINGS_FILE));
        apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
        settings
    }

    pub fn from_file(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn apply_env_overrides(settings: &mut AppSettings, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(secret) = non_empty(ENV_SECRET) {
        settings.access_secret = secret;
    }
    if let Some(config) = non_empty(ENV_CONFIG) {
        settings.config_file = PathBuf::from(config);
    }
}
