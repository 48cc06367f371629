// src/dashboard.rs
use chrono::NaiveDate;

use crate::data_types::{OrderTable, Summary};
use crate::presenter::{present, PresentedTable};
use crate::search_filter::search;
use crate::summary::summarize;

/// Everything the order list screen shows for one search pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: Summary,
    pub table: PresentedTable,
}

impl DashboardView {
    pub fn alert(&self) -> Option<String> {
        match self.summary.due_soon {
            0 => None,
            n => Some(format!(
                "Attention: {} order(s) are overdue or due within the next week!",
                n
            )),
        }
    }
}

/// Search first, then count on the normalized dates, then format for display.
pub fn build_view(orders: &OrderTable, query: &str, today: NaiveDate, window_days: i64) -> DashboardView {
    let visible = search(orders, query);
    let summary = summarize(visible.iter().copied(), today, window_days);
    let table = present(orders, &visible);
    DashboardView { summary, table }
}
