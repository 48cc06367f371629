// src/cloud_handler.rs
use std::time::Duration;

use reqwest::StatusCode;

use crate::error::LoadError;

#[derive(Clone)]
pub struct CloudHandler {
    client: reqwest::Client,
}

impl CloudHandler {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(CloudHandler { client })
    }

    /// Downloads the workbook behind a direct-download URL. Anything but
    /// 200 OK is reported with its status code.
    pub async fn fetch_workbook(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        log::info!("Downloading {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("Download of {} failed with status {}", url, status);
            return Err(LoadError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        log::debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
