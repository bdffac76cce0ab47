//! Workday counting.
//!
//! A workday is any date falling Monday through Friday. Public holidays are
//! not considered.

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns true for Monday through Friday.
///
/// # Example
///
/// ```
/// use paystub_engine::calculation::is_workday;
/// use chrono::NaiveDate;
///
/// assert!(is_workday(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap())); // Friday
/// assert!(!is_workday(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())); // Saturday
/// ```
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the workdays in the inclusive range `[start, end]`.
///
/// A reversed range (`start > end`) counts as empty and returns zero rather
/// than failing; overlap arithmetic in the accrual stage relies on this.
///
/// # Example
///
/// ```
/// use paystub_engine::calculation::count_workdays;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2021, 10, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2021, 10, 28).unwrap();
/// assert_eq!(count_workdays(start, end), 10);
/// assert_eq!(count_workdays(end, start), 0);
/// ```
pub fn count_workdays(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    // Whole weeks contribute five workdays each; walk only the remainder.
    let days = (end - start).num_days() + 1;
    let full_weeks = days / 7;
    let remainder = days % 7;

    let tail = start
        .iter_days()
        .take(remainder as usize)
        .filter(|date| is_workday(*date))
        .count() as i64;

    (full_weeks * 5 + tail) as u32
}
