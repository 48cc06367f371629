// src/data_loader.rs
use std::path::Path;

use tokio::task;

use crate::cloud_handler::CloudHandler;
use crate::csv_handler::CSVHandler;
use crate::data_types::{DataSource, OrderTable, TableData};
use crate::error::LoadError;
use crate::record_filter::filter_orders;
use crate::settings::AppSettings;
use crate::xlsx_handler::XlsxHandler;

/// Fetches or reads the order list and hands back only the Boru and Özel orders.
#[derive(Clone)]
pub struct DataLoader {
    cloud: CloudHandler,
}

impl DataLoader {
    pub fn new(settings: &AppSettings) -> Result<Self, LoadError> {
        Ok(DataLoader {
            cloud: CloudHandler::new(settings.request_timeout())?,
        })
    }

    pub async fn load(&self, source: &DataSource) -> Result<OrderTable, LoadError> {
        let table = match source {
            DataSource::Remote(url) => {
                let bytes = self.cloud.fetch_workbook(url).await?;
                task::spawn_blocking(move || XlsxHandler::new().read_bytes(bytes)).await??
            }
            DataSource::Local(path) => {
                let path = path.clone();
                task::spawn_blocking(move || read_local(&path)).await??
            }
        };

        let orders = filter_orders(&table)?;
        log::info!(
            "Loaded {} orders ({} rows) from {}",
            orders.len(),
            table.rows.len(),
            source
        );
        Ok(orders)
    }
}

fn read_local(path: &Path) -> Result<TableData, LoadError> {
    if is_csv(path) {
        CSVHandler::new().read_csv(path)
    } else {
        XlsxHandler::new().read_file(path)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}
