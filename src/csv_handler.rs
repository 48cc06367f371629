// src/csv_handler.rs
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;

use crate::data_types::{Cell, TableData};
use crate::error::LoadError;

pub struct CSVHandler {}

impl CSVHandler {
    pub fn new() -> Self {
        CSVHandler {}
    }

    /// Reads an order list exported as CSV. All values come in as text.
    pub fn read_csv(&self, path: &Path) -> Result<TableData, LoadError> {
        // First check if file uses comma or semicolon as delimiter
        let delimiter = Self::detect_delimiter(path)?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);

        let mut data = TableData::empty();
        data.headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping unreadable CSV row: {}", e);
                    continue;
                }
            };

            // Skip empty rows
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            data.rows.push(record.iter().map(text_cell).collect());
        }

        Ok(data)
    }

    fn detect_delimiter(path: &Path) -> Result<u8, LoadError> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut first_line = String::new();
        reader.read_line(&mut first_line)?;

        if first_line.contains(';') {
            Ok(b';')
        } else {
            Ok(b',')
        }
    }
}

fn text_cell(field: &str) -> Cell {
    if field.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_semicolon_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "Bölüm;Fiş No;Termin Süresi\nBoru;1001;2024-01-05\n;;\nÖzel;1002;\n",
        )
        .unwrap();

        let data = CSVHandler::new().read_csv(&path).unwrap();
        assert_eq!(data.headers, vec!["Bölüm", "Fiş No", "Termin Süresi"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0][1], Cell::Text("1001".to_string()));
        assert_eq!(data.rows[1][2], Cell::Empty);
    }

    #[test]
    fn test_reads_comma_export_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "\u{feff}Bölüm,Miktar\nboru,12\n").unwrap();

        let data = CSVHandler::new().read_csv(&path).unwrap();
        assert_eq!(data.headers, vec!["Bölüm", "Miktar"]);
        assert_eq!(data.rows, vec![vec![Cell::Text("boru".to_string()), Cell::Text("12".to_string())]]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CSVHandler::new().read_csv(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
