// src/record_filter.rs
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::data_types::{Cell, Column, Department, OrderRecord, OrderTable, TableData};
use crate::error::SchemaError;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// Slash dates are month-first. The dotted form is read day-first, not
// month-first, to match the dd.mm.yyyy form the dashboard prints.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

// Excel serials count days from 1899-12-30 (the 1900 leap-year bug included).
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Keeps the Boru and Özel orders and normalizes their due dates.
pub fn filter_orders(table: &TableData) -> Result<OrderTable, SchemaError> {
    let department_col = table
        .column_index(Column::Department)
        .ok_or(SchemaError::MissingDepartmentColumn)?;
    let due_col = table.column_index(Column::DueDate);

    let mut records = Vec::new();
    for row in &table.rows {
        let department = row
            .get(department_col)
            .and_then(Cell::as_text)
            .and_then(|text| Department::parse(&text));
        let department = match department {
            Some(department) => department,
            None => continue,
        };

        let mut cells = row.clone();
        cells.resize(table.headers.len(), Cell::Empty);

        let due_date = due_col.and_then(|col| {
            let due = parse_due_date(&cells[col]);
            cells[col] = due.map(Cell::Date).unwrap_or(Cell::Empty);
            due
        });

        records.push(OrderRecord {
            department,
            due_date,
            cells,
        });
    }

    log::debug!(
        "Kept {} of {} rows after department filter",
        records.len(),
        table.rows.len()
    );

    Ok(OrderTable {
        headers: table.headers.clone(),
        records,
    })
}

/// Anything that does not read as a date becomes `None`.
pub fn parse_due_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(date) => Some(*date),
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Number(serial) => from_excel_serial(*serial),
        Cell::Int(serial) => from_excel_serial(*serial as f64),
        Cell::Text(text) => parse_date_text(text),
        Cell::Empty | Cell::Bool(_) | Cell::Error(_) => None,
    }
}

pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > EXCEL_MAX_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_table() -> TableData {
        TableData {
            headers: vec![
                "Bölüm".to_string(),
                "Fiş No".to_string(),
                "Termin Süresi".to_string(),
            ],
            rows: vec![
                vec![text("Boru"), Cell::Int(101), text("2024-01-01")],
                vec![text("Elektrik"), Cell::Int(102), text("2024-01-02")],
                vec![text("ÖZEL"), Cell::Int(103), Cell::Number(45302.0)],
                vec![text("ozel"), Cell::Int(104), text("not-a-date")],
                vec![Cell::Empty, Cell::Int(105), text("2024-01-05")],
                vec![text("boru")],
            ],
        }
    }

    #[test]
    fn test_keeps_recognized_departments_in_order() {
        let orders = filter_orders(&sample_table()).unwrap();
        let departments: Vec<Department> = orders.records.iter().map(|r| r.department).collect();
        assert_eq!(
            departments,
            vec![
                Department::Pipe,
                Department::Special,
                Department::Special,
                Department::Pipe
            ]
        );
    }

    #[test]
    fn test_due_dates_are_normalized() {
        let orders = filter_orders(&sample_table()).unwrap();
        let due: Vec<Option<NaiveDate>> = orders.records.iter().map(|r| r.due_date).collect();
        assert_eq!(
            due,
            vec![Some(date(2024, 1, 1)), Some(date(2024, 1, 11)), None, None]
        );
        assert_eq!(orders.records[0].cells[2], Cell::Date(date(2024, 1, 1)));
        assert_eq!(orders.records[2].cells[2], Cell::Empty);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let orders = filter_orders(&sample_table()).unwrap();
        assert_eq!(orders.records[3].cells.len(), 3);
        assert_eq!(orders.records[3].due_date, None);
    }

    #[test]
    fn test_missing_department_column() {
        let table = TableData {
            headers: vec!["Fiş No".to_string()],
            rows: vec![vec![Cell::Int(1)]],
        };
        assert_eq!(
            filter_orders(&table),
            Err(SchemaError::MissingDepartmentColumn)
        );
    }

    #[test]
    fn test_table_without_due_column() {
        let table = TableData {
            headers: vec!["Bölüm".to_string()],
            rows: vec![vec![text("Boru")]],
        };
        let orders = filter_orders(&table).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders.records[0].due_date, None);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_orders(&sample_table()).unwrap();
        let twice = filter_orders(&once.to_table()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_date_text_formats() {
        assert_eq!(parse_date_text("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date_text("2024-02-29 13:45:00"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date_text("2024-02-29T13:45:00"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date_text("2024/03/01"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_text("03/01/2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_text("01.03.2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_text(" 2024-01-01 "), Some(date(2024, 1, 1)));
        assert_eq!(parse_date_text("04/03/2024"), Some(date(2024, 4, 3)));
        assert_eq!(parse_date_text("04.03.2024"), Some(date(2024, 3, 4)));
        assert_eq!(parse_date_text("25.12.2024"), Some(date(2024, 12, 25)));
        assert_eq!(parse_date_text("not-a-date"), None);
        assert_eq!(parse_date_text("2024-13-01"), None);
        assert_eq!(parse_date_text(""), None);
    }

    #[test]
    fn test_excel_serials() {
        assert_eq!(parse_due_date(&Cell::Number(45292.0)), Some(date(2024, 1, 1)));
        assert_eq!(parse_due_date(&Cell::Number(45292.75)), Some(date(2024, 1, 1)));
        assert_eq!(parse_due_date(&Cell::Int(45293)), Some(date(2024, 1, 2)));
        assert_eq!(parse_due_date(&Cell::Number(0.0)), None);
        assert_eq!(parse_due_date(&Cell::Number(f64::NAN)), None);
        assert_eq!(parse_due_date(&Cell::Number(1e12)), None);
    }

    #[test]
    fn test_non_date_cells() {
        assert_eq!(parse_due_date(&Cell::Empty), None);
        assert_eq!(parse_due_date(&Cell::Bool(true)), None);
        assert_eq!(parse_due_date(&Cell::Error("#N/A".to_string())), None);
    }
}
