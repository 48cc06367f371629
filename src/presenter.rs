// src/presenter.rs
use chrono::NaiveDate;

use crate::data_types::{Column, OrderRecord, OrderTable, DISPLAY_DATE_FORMAT};

pub const DISPLAY_COLUMNS: [Column; 9] = [
    Column::Department,
    Column::FileName,
    Column::ReceiptNo,
    Column::MailDate,
    Column::DrawingCode,
    Column::Description,
    Column::Quantity,
    Column::Unit,
    Column::DueDate,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn format_due_date(due: Option<NaiveDate>) -> String {
    due.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Picks the display columns present in the table and renders every cell as text.
pub fn present(orders: &OrderTable, records: &[&OrderRecord]) -> PresentedTable {
    let columns: Vec<(Column, usize)> = DISPLAY_COLUMNS
        .iter()
        .filter_map(|&column| orders.column_index(column).map(|index| (column, index)))
        .collect();

    let headers = columns
        .iter()
        .map(|(column, _)| column.header().to_string())
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|&(column, index)| match column {
                    Column::DueDate => format_due_date(record.due_date),
                    _ => record.cell(index).as_text().unwrap_or_default(),
                })
                .collect()
        })
        .collect();

    PresentedTable { headers, rows }
}
