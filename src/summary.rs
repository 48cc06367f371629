// src/summary.rs
use chrono::{Duration, NaiveDate};

use crate::data_types::{Department, OrderRecord, Summary};

pub const DEFAULT_DUE_WINDOW_DAYS: i64 = 7;

/// Counts orders per department and those due within `window_days` of
/// `today`. Overdue orders count as due; orders without a date never do.
pub fn summarize<'a, I>(records: I, today: NaiveDate, window_days: i64) -> Summary
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let deadline = due_deadline(today, window_days);
    let mut summary = Summary::default();

    for record in records {
        summary.total += 1;
        match record.department {
            Department::Pipe => summary.pipe += 1,
            Department::Special => summary.special += 1,
        }
        if record.due_date.map_or(false, |due| due <= deadline) {
            summary.due_soon += 1;
        }
    }

    summary
}

// Windows past the calendar range saturate instead of overflowing.
fn due_deadline(today: NaiveDate, window_days: i64) -> NaiveDate {
    Duration::try_days(window_days)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(if window_days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(department: Department, due_date: Option<NaiveDate>) -> OrderRecord {
        OrderRecord {
            department,
            due_date,
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_counts_per_department() {
        let records = vec![
            order(Department::Pipe, None),
            order(Department::Special, None),
            order(Department::Special, None),
        ];
        let summary = summarize(&records, date(2024, 1, 1), DEFAULT_DUE_WINDOW_DAYS);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.pipe, 1);
        assert_eq!(summary.special, 2);
        assert_eq!(summary.due_soon, 0);
    }

    #[test]
    fn test_due_window_boundary() {
        let today = date(2024, 1, 1);
        let records = vec![
            order(Department::Pipe, Some(date(2024, 1, 8))),
            order(Department::Pipe, Some(date(2024, 1, 9))),
        ];
        let summary = summarize(&records, today, DEFAULT_DUE_WINDOW_DAYS);
        assert_eq!(summary.due_soon, 1);
    }

    #[test]
    fn test_overdue_counts_as_due() {
        let records = vec![order(Department::Special, Some(date(2023, 6, 30)))];
        let summary = summarize(&records, date(2024, 1, 1), DEFAULT_DUE_WINDOW_DAYS);
        assert_eq!(summary.due_soon, 1);
    }

    #[test]
    fn test_missing_dates_never_count() {
        let today = date(2024, 1, 1);
        let records: Vec<OrderRecord> = (0..20)
            .map(|i| {
                let due = if i % 3 == 0 { None } else { Some(today + Duration::days(i - 10)) };
                order(Department::Pipe, due)
            })
            .collect();
        let with_dates = records.iter().filter(|r| r.due_date.is_some()).count();

        for window in [-30, 0, 7, 365] {
            let summary = summarize(&records, today, window);
            assert!(summary.due_soon <= with_dates);
        }
        assert_eq!(summarize(&records, today, 10_000).due_soon, with_dates);
    }

    #[test]
    fn test_huge_window_saturates() {
        let today = date(2024, 1, 1);
        let records = vec![
            order(Department::Pipe, Some(date(2300, 1, 1))),
            order(Department::Special, Some(date(1990, 1, 1))),
            order(Department::Special, None),
        ];
        assert_eq!(summarize(&records, today, i64::MAX).due_soon, 2);
        assert_eq!(summarize(&records, today, i64::MAX / 2).due_soon, 2);
        assert_eq!(summarize(&records, today, i64::MIN).due_soon, 0);
        assert_eq!(due_deadline(today, i64::MAX), NaiveDate::MAX);
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(Vec::<&OrderRecord>::new(), date(2024, 1, 1), 7);
        assert_eq!(summary, Summary::default());
    }
}
