// src/source_resolver.rs
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data_types::DataSource;

// Drive share links look like https://drive.google.com/file/d/<ID>/view?usp=sharing
static DRIVE_FILE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"drive\.google\.com/(?:[^?#]*/)?d/([A-Za-z0-9_-]+)").unwrap());
static DRIVE_OPEN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"drive\.google\.com/(?:open|uc)\?(?:.*&)?id=([A-Za-z0-9_-]+)").unwrap());
static SHEETS_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)").unwrap());

pub struct SourceResolver {
    config_file: PathBuf,
    default_workbook: PathBuf,
}

impl SourceResolver {
    pub fn new(config_file: impl Into<PathBuf>, default_workbook: impl Into<PathBuf>) -> Self {
        SourceResolver {
            config_file: config_file.into(),
            default_workbook: default_workbook.into(),
        }
    }

    /// Picks the data source: the config file first, then the default workbook.
    pub fn resolve(&self) -> Option<DataSource> {
        if let Some(content) = read_config(&self.config_file) {
            if content.starts_with("http") {
                let url = direct_download_url(&content);
                log::info!("Using remote source {}", url);
                return Some(DataSource::Remote(url));
            }
            let path = PathBuf::from(&content);
            if path.exists() {
                log::info!("Using local source {}", path.display());
                return Some(DataSource::Local(path));
            }
            log::warn!(
                "{} points to '{}', which does not exist",
                self.config_file.display(),
                content
            );
        }

        if self.default_workbook.exists() {
            log::info!("Using default workbook {}", self.default_workbook.display());
            return Some(DataSource::Local(self.default_workbook.clone()));
        }

        log::warn!("No data source found");
        None
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }
}

/// Reads the trimmed config content. Missing or undecodable files read as `None`.
pub fn read_config(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    match decode_config(&bytes) {
        Some(content) => Some(content),
        None => {
            log::warn!("Ignoring {}: neither UTF-8 nor UTF-16", path.display());
            None
        }
    }
}

pub fn decode_config(bytes: &[u8]) -> Option<String> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
        Err(_) => decode_utf16(bytes)?,
    };
    Some(text.trim().to_string())
}

// Windows editors like to save plain text as UTF-16 with a BOM.
fn decode_utf16(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let (big_endian, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        _ => (false, bytes),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

/// Rewrites share-view links into links that serve the raw file.
pub fn direct_download_url(url: &str) -> String {
    if let Some(id) = SHEETS_LINK.captures(url).and_then(|c| c.get(1)) {
        return format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=xlsx",
            id.as_str()
        );
    }
    let drive_id = DRIVE_FILE_LINK
        .captures(url)
        .or_else(|| DRIVE_OPEN_LINK.captures(url))
        .and_then(|c| c.get(1));
    match drive_id {
        Some(id) => format!("https://drive.google.com/uc?export=download&id={}", id.as_str()),
        None => url.to_string(),
    }
}
