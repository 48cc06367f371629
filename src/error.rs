// src/error.rs
use thiserror::Error;

use crate::data_types::Column;

/// The table loaded fine but does not look like an order list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("the sheet has no '{}' column", Column::Department.header())]
    MissingDepartmentColumn,
}

/// Errors are cloneable so they can travel inside UI messages; wrapped
/// errors are kept as their rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("download failed with status code {0}")]
    Status(u16),
    #[error("download failed: {0}")]
    Http(String),
    #[error("could not read file: {0}")]
    Io(String),
    #[error("error while reading the workbook: {0}")]
    Workbook(String),
    #[error("the workbook has no sheets")]
    NoSheets,
    #[error("error while reading the CSV file: {0}")]
    Csv(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        LoadError::Http(e.to_string())
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e.to_string())
    }
}

impl From<calamine::Error> for LoadError {
    fn from(e: calamine::Error) -> Self {
        LoadError::Workbook(e.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e.to_string())
    }
}

impl From<tokio::task::JoinError> for LoadError {
    fn from(e: tokio::task::JoinError) -> Self {
        LoadError::Task(e.to_string())
    }
}
