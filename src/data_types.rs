// src/data_types.rs
use std::fmt;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    Remote(String),
    Local(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{}", url),
            DataSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A single spreadsheet value, detached from the parser that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Error(String),
}

impl Cell {
    /// Text form used for matching and display. `None` for empty cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Int(n) => Some(n.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Cell::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::Error(e) => Some(e.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

// Integral values print without the trailing ".0" spreadsheets add to counts.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Lowercases text so that the Turkish dotted and dotless i compare equal.
/// `İ` lowercases to `i` plus a combining dot, and `ı` has no uppercase
/// relation to `i`, so both are folded onto a plain `i`.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != '\u{307}')
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableData {
    pub fn empty() -> Self {
        TableData {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        find_column(&self.headers, column)
    }
}

fn find_column(headers: &[String], column: Column) -> Option<usize> {
    headers.iter().position(|h| h == column.header())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Pipe,
    Special,
}

impl Department {
    pub const ALL: [Department; 2] = [Department::Pipe, Department::Special];

    /// Recognizes "boru" and both spellings of "özel", ignoring case and
    /// surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match fold_case(raw.trim()).as_str() {
            "boru" => Some(Department::Pipe),
            "özel" | "ozel" => Some(Department::Special),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::Pipe => "Boru",
            Department::Special => "Özel",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Known columns of the order list, matched by exact header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Department,
    FileName,
    ReceiptNo,
    MailDate,
    DrawingCode,
    Description,
    Quantity,
    Unit,
    DueDate,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Department => "Bölüm",
            Column::FileName => "Dosya Adı",
            Column::ReceiptNo => "Fiş No",
            Column::MailDate => "Mail Tarihi",
            Column::DrawingCode => "Resim Kodu",
            Column::Description => "Açıklaması",
            Column::Quantity => "Miktar",
            Column::Unit => "Birimi",
            Column::DueDate => "Termin Süresi",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub department: Department,
    pub due_date: Option<NaiveDate>,
    /// All cells of the source row, aligned with `OrderTable::headers`.
    pub cells: Vec<Cell>,
}

impl OrderRecord {
    pub fn cell(&self, index: usize) -> &Cell {
        self.cells.get(index).unwrap_or(&Cell::Empty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderTable {
    pub headers: Vec<String>,
    pub records: Vec<OrderRecord>,
}

impl OrderTable {
    pub fn column_index(&self, column: Column) -> Option<usize> {
        find_column(&self.headers, column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turns the filtered orders back into a plain table.
    #[cfg(test)]
    pub fn to_table(&self) -> TableData {
        TableData {
            headers: self.headers.clone(),
            rows: self.records.iter().map(|r| r.cells.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub pipe: usize,
    pub special: usize,
    pub due_soon: usize,
}

impl Summary {
    pub fn count_for(&self, department: Department) -> usize {
        match department {
            Department::Pipe => self.pipe,
            Department::Special => self.special,
        }
    }
}
