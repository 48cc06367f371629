// src/xlsx_handler.rs
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::data_types::{Cell, TableData};
use crate::error::LoadError;
use crate::record_filter::parse_date_text;

pub struct XlsxHandler {}

impl XlsxHandler {
    pub fn new() -> Self {
        XlsxHandler {}
    }

    /// Opens a workbook on disk (xlsx, xls, xlsb or ods) and reads its first sheet.
    pub fn read_file(&self, path: &Path) -> Result<TableData, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        Self::read_first_sheet(&mut workbook)
    }

    /// Reads the first sheet of a downloaded workbook. The format is sniffed
    /// from the content, since share links rarely carry a file extension.
    pub fn read_bytes(&self, bytes: Vec<u8>) -> Result<TableData, LoadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Self::read_first_sheet(&mut workbook)
    }

    fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<TableData, LoadError> {
        let range = workbook.worksheet_range_at(0).ok_or(LoadError::NoSheets)??;
        Ok(Self::range_to_table(&range))
    }

    fn range_to_table(range: &Range<Data>) -> TableData {
        let mut data = TableData::empty();
        let mut rows = range.rows();

        let headers = match rows.next() {
            Some(headers) => headers,
            None => return data,
        };
        data.headers = headers
            .iter()
            .map(|h| convert_cell(h).as_text().unwrap_or_default().trim().to_string())
            .collect();

        for row in rows {
            let cells: Vec<Cell> = row.iter().map(convert_cell).collect();
            // Skip empty rows
            if cells.iter().all(Cell::is_empty) {
                continue;
            }
            data.rows.push(cells);
        }

        data
    }
}

pub fn convert_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Int(*n),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::DateTime(datetime),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_date_text(s) {
            Some(date) => Cell::Date(date),
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
