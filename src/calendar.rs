// File: ./src/calendar.rs
// Month arithmetic for the calendar view.
use chrono::{Datelike, Months, NaiveDate};

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Cells of a Sunday-first month view: `None` padding, then day numbers.
pub fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_sunday() as usize;

    let mut cells = vec![None; offset];
    cells.extend((1..=days_in_month(year, month)).map(Some));
    cells
}

/// First day of the month `delta` months away from `date`.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta as u32))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 13), 0);
    }
}
