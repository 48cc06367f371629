// src/search_filter.rs
use crate::data_types::{fold_case, Cell, OrderRecord, OrderTable, DISPLAY_DATE_FORMAT};

/// Case-insensitive substring search across every cell of every order.
/// Only the empty query keeps all rows; any other input, whitespace
/// included, is matched as typed. Row order is preserved.
pub fn search<'a>(orders: &'a OrderTable, query: &str) -> Vec<&'a OrderRecord> {
    if query.is_empty() {
        return orders.records.iter().collect();
    }
    let needle = fold_case(query);
    orders
        .records
        .iter()
        .filter(|record| record.cells.iter().any(|cell| cell_matches(cell, &needle)))
        .collect()
}

fn cell_matches(cell: &Cell, needle: &str) -> bool {
    // Dates are also matched in the dd.mm.yyyy form shown in the table.
    if let Cell::Date(date) = cell {
        let shown = date.format(DISPLAY_DATE_FORMAT).to_string();
        if shown.contains(needle) {
            return true;
        }
    }
    cell.as_text()
        .map(|text| fold_case(&text).contains(needle))
        .unwrap_or(false)
}
