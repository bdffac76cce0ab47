//! Pay date generation.
//!
//! [`PayDates`] walks a schedule from its anchor date to its end bound at a
//! fixed cadence. It owns nothing but its cursor, so a schedule can hand out
//! any number of independent iterators.

use std::iter::FusedIterator;

use chrono::{Duration, NaiveDate};

/// Iterator over the pay dates of a [`PaySchedule`](crate::models::PaySchedule).
///
/// Yields `anchor, anchor + cadence, anchor + 2·cadence, …` up to and
/// including the last date not after the end bound.
///
/// # Example
///
/// ```
/// use paystub_engine::models::PaySchedule;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let schedule = PaySchedule::new(
///     NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
///     14,
///     NaiveDate::from_ymd_opt(2021, 12, 1).unwrap(),
///     Decimal::from(100),
/// )?;
///
/// let dates: Vec<NaiveDate> = schedule.pay_dates().collect();
/// assert_eq!(dates, vec![
///     NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
///     NaiveDate::from_ymd_opt(2021, 11, 11).unwrap(),
///     NaiveDate::from_ymd_opt(2021, 11, 25).unwrap(),
/// ]);
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PayDates {
    next: Option<NaiveDate>,
    end_date: NaiveDate,
    cadence: Duration,
}

impl PayDates {
    /// Creates an iterator starting at `anchor_date`.
    ///
    /// A non-positive cadence yields the anchor once (if it is within the end
    /// bound) and then stops.
    pub fn new(anchor_date: NaiveDate, end_date: NaiveDate, cadence: Duration) -> Self {
        Self {
            next: Some(anchor_date),
            end_date,
            cadence,
        }
    }

    fn remaining(&self) -> usize {
        match self.next {
            Some(next) if next <= self.end_date => {
                let cadence = self.cadence.num_days();
                if cadence <= 0 {
                    return 1;
                }
                ((self.end_date - next).num_days() / cadence) as usize + 1
            }
            _ => 0,
        }
    }
}

impl Iterator for PayDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|date| *date <= self.end_date)?;
        self.next = if self.cadence > Duration::zero() {
            current.checked_add_signed(self.cadence)
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PayDates {}

impl FusedIterator for PayDates {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaySchedule;
    use chrono::{Datelike, Weekday};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference_schedule() -> PaySchedule {
        PaySchedule::new(date(2021, 10, 28), 14, date(2025, 4, 30), Decimal::from(100)).unwrap()
    }

    #[test]
    fn test_first_and_last_pay_dates() {
        let dates: Vec<NaiveDate> = reference_schedule().pay_dates().collect();
        assert_eq!(dates.first(), Some(&date(2021, 10, 28)));
        assert_eq!(dates.last(), Some(&date(2025, 4, 24)));
        assert_eq!(dates.len(), 92);
    }

    #[test]
    fn test_every_pay_date_shares_anchor_weekday() {
        assert!(
            reference_schedule()
                .pay_dates()
                .all(|d| d.weekday() == Weekday::Thu)
        );
    }

    #[test]
    fn test_year_boundary_dates() {
        let dates: Vec<NaiveDate> = reference_schedule().pay_dates().collect();
        assert!(dates.contains(&date(2021, 12, 23)));
        assert!(dates.contains(&date(2022, 1, 6)));
        assert!(dates.contains(&date(2023, 1, 5)));
        assert!(dates.contains(&date(2024, 1, 4)));
        assert!(dates.contains(&date(2025, 1, 2)));
    }

    #[test]
    fn test_restart_yields_identical_sequence() {
        let schedule = reference_schedule();
        let first: Vec<NaiveDate> = schedule.pay_dates().collect();
        let second: Vec<NaiveDate> = schedule.pay_dates().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_exact_size_tracks_consumption() {
        let mut dates = reference_schedule().pay_dates();
        assert_eq!(dates.len(), 92);
        dates.next();
        dates.next();
        assert_eq!(dates.len(), 90);
        let rest: Vec<NaiveDate> = dates.by_ref().collect();
        assert_eq!(rest.len(), 90);
        assert_eq!(dates.len(), 0);
        assert_eq!(dates.next(), None);
    }

    #[test]
    fn test_anchor_after_end_yields_nothing() {
        let mut dates = PayDates::new(date(2022, 1, 6), date(2022, 1, 5), Duration::days(14));
        assert_eq!(dates.len(), 0);
        assert_eq!(dates.next(), None);
    }

    #[test]
    fn test_non_positive_cadence_yields_anchor_once() {
        let dates: Vec<NaiveDate> =
            PayDates::new(date(2022, 1, 6), date(2022, 3, 1), Duration::zero()).collect();
        assert_eq!(dates, vec![date(2022, 1, 6)]);
    }

    proptest! {
        #[test]
        fn prop_schedule_is_evenly_spaced_and_bounded(
            offset in 0i64..10_000,
            cadence in 1i64..60,
            span in 0i64..2_000,
        ) {
            let anchor = date(2000, 1, 1) + Duration::days(offset);
            let schedule = PaySchedule::new(
                anchor,
                cadence,
                anchor + Duration::days(span),
                Decimal::from(100),
            ).unwrap();

            let dates: Vec<NaiveDate> = schedule.pay_dates().collect();
            prop_assert_eq!(dates.len(), schedule.period_count());
            prop_assert_eq!(dates[0], anchor);
            for pair in dates.windows(2) {
                prop_assert_eq!((pair[1] - pair[0]).num_days(), cadence);
            }
            let last = *dates.last().unwrap();
            prop_assert!(last <= schedule.end_date());
            prop_assert!(last + Duration::days(cadence) > schedule.end_date());
        }

        #[test]
        fn prop_generation_is_deterministic(offset in 0i64..10_000, cadence in 1i64..60) {
            let anchor = date(2000, 1, 1) + Duration::days(offset);
            let schedule = PaySchedule::new(
                anchor,
                cadence,
                anchor + Duration::days(730),
                Decimal::from(100),
            ).unwrap();
            let first: Vec<NaiveDate> = schedule.pay_dates().collect();
            let second: Vec<NaiveDate> = schedule.pay_dates().collect();
            prop_assert_eq!(first, second);
        }
    }
}
