//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the contiguous run of calendar
//! days that one pay date settles.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A pay period ending on its pay date.
///
/// Periods are derived from a pay date and the schedule cadence, never
/// configured directly. A period always spans exactly `cadence` calendar
/// days, ending on (and including) the pay date.
///
/// # Example
///
/// ```
/// use paystub_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::ending_on(NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(), 14);
///
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2021, 10, 15).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2021, 10, 28).unwrap());
/// assert_eq!(period.length_days(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// The date the period is paid. Always equal to `end_date`.
    pub pay_date: NaiveDate,
}

impl PayPeriod {
    /// Builds the period of `cadence_days` calendar days that ends on `pay_date`.
    ///
    /// A cadence of zero is treated as one day. A start date before
    /// [`NaiveDate::MIN`] is clamped to it; [`PaySchedule::new`] rejects any
    /// cadence for which that could happen.
    ///
    /// [`PaySchedule::new`]: crate::models::PaySchedule::new
    pub fn ending_on(pay_date: NaiveDate, cadence_days: u32) -> Self {
        Self {
            start_date: Self::checked_start(pay_date, cadence_days).unwrap_or(NaiveDate::MIN),
            end_date: pay_date,
            pay_date,
        }
    }

    /// The first day of the period ending on `pay_date`, or `None` when it
    /// falls outside the representable date range.
    pub fn checked_start(pay_date: NaiveDate, cadence_days: u32) -> Option<NaiveDate> {
        let back = i64::from(cadence_days.saturating_sub(1));
        pay_date.checked_sub_signed(Duration::days(back))
    }

    /// Number of calendar days covered, counting both ends.
    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    ///
    /// # Example
    ///
    /// ```
    /// use paystub_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::ending_on(NaiveDate::from_ymd_opt(2022, 1, 6).unwrap(), 14);
    ///
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2021, 12, 24).unwrap())); // start date
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap())); // middle
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2022, 1, 6).unwrap())); // end date
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2021, 12, 23).unwrap())); // before
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2022, 1, 7).unwrap())); // after
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true when the period starts in an earlier calendar year than
    /// the one it is paid in.
    pub fn straddles_year_boundary(&self) -> bool {
        self.start_date.year() != self.pay_date.year()
    }
}
