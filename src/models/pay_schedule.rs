//! Pay schedule configuration.
//!
//! A [`PaySchedule`] is the validated, immutable description of a fixed
//! cadence salary: where the schedule starts, how often it pays, when it
//! stops and how much each period pays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculation::PayDates;
use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// Steps `candidate` backward one day at a time until it falls on `weekday`.
///
/// Returns `candidate` unchanged when it already falls on `weekday`, and
/// `None` only if the walk would leave the representable date range.
///
/// # Example
///
/// ```
/// use paystub_engine::models::roll_back_to_weekday;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2025-04-30 is a Wednesday; the previous Thursday is 2025-04-24.
/// let rolled = roll_back_to_weekday(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(), Weekday::Thu);
/// assert_eq!(rolled, NaiveDate::from_ymd_opt(2025, 4, 24));
/// ```
pub fn roll_back_to_weekday(candidate: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let mut date = candidate;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    Some(date)
}

/// The immutable configuration of a pay schedule.
///
/// Construct with [`PaySchedule::new`], which validates the configuration
/// and rolls the end bound back to the anchor's weekday. Every value of this
/// type satisfies:
///
/// - `cadence_days > 0`
/// - `end_date.weekday() == anchor_date.weekday()`
/// - `end_date >= anchor_date`
/// - `gross_per_period >= 0`
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
///     NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
///     Decimal::from(90000) / Decimal::from(26),
/// )?;
///
/// assert_eq!(schedule.end_date(), NaiveDate::from_ymd_opt(2025, 4, 24).unwrap());
/// assert_eq!(schedule.period_count(), 92);
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaySchedule {
    anchor_date: NaiveDate,
    cadence_days: u32,
    end_date: NaiveDate,
    gross_per_period: Decimal,
}

impl PaySchedule {
    /// Validates a schedule configuration.
    ///
    /// `end_candidate` is the inclusive upper limit as supplied; it is rolled
    /// backward to the nearest date sharing the anchor's weekday.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if:
    /// - `cadence_days` is zero or negative, does not fit in a `u32`, or
    ///   would start the first period before the earliest representable date
    /// - `gross_per_period` is negative
    /// - the rolled end bound precedes the anchor date
    pub fn new(
        anchor_date: NaiveDate,
        cadence_days: i64,
        end_candidate: NaiveDate,
        gross_per_period: Decimal,
    ) -> EngineResult<Self> {
        if cadence_days <= 0 {
            return Err(EngineError::invalid_schedule(
                "cadence_days",
                format!("must be greater than zero, got {}", cadence_days),
            ));
        }
        let cadence_days = u32::try_from(cadence_days).map_err(|_| {
            EngineError::invalid_schedule(
                "cadence_days",
                format!("{} is too large", cadence_days),
            )
        })?;

        if PayPeriod::checked_start(anchor_date, cadence_days).is_none() {
            return Err(EngineError::invalid_schedule(
                "cadence_days",
                format!(
                    "a {}-day period ending on {} starts before the earliest supported date",
                    cadence_days, anchor_date
                ),
            ));
        }

        if gross_per_period < Decimal::ZERO {
            return Err(EngineError::invalid_schedule(
                "gross_per_period",
                format!("must not be negative, got {}", gross_per_period),
            ));
        }

        let end_date = roll_back_to_weekday(end_candidate, anchor_date.weekday()).ok_or_else(
            || {
                EngineError::invalid_schedule(
                    "end_date",
                    format!("cannot roll {} back to a {}", end_candidate, anchor_date.weekday()),
                )
            },
        )?;

        if end_date.weekday() != anchor_date.weekday() {
            return Err(EngineError::invalid_schedule(
                "end_date",
                format!(
                    "rolled end bound {} falls on {}, anchor falls on {}",
                    end_date,
                    end_date.weekday(),
                    anchor_date.weekday()
                ),
            ));
        }

        if end_date < anchor_date {
            return Err(EngineError::invalid_schedule(
                "end_date",
                format!(
                    "end bound {} (rolled to {}) precedes anchor date {}",
                    end_candidate, end_date, anchor_date
                ),
            ));
        }

        Ok(Self {
            anchor_date,
            cadence_days,
            end_date,
            gross_per_period,
        })
    }

    /// The first pay date of the schedule.
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    /// Calendar days between consecutive pay dates.
    pub fn cadence_days(&self) -> u32 {
        self.cadence_days
    }

    /// The cadence as a [`Duration`].
    pub fn cadence(&self) -> Duration {
        Duration::days(i64::from(self.cadence_days))
    }

    /// The inclusive end bound, already rolled to the anchor's weekday.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The fixed gross amount paid each period.
    pub fn gross_per_period(&self) -> Decimal {
        self.gross_per_period
    }

    /// The weekday every pay date of this schedule is anchored to.
    pub fn pay_weekday(&self) -> Weekday {
        self.anchor_date.weekday()
    }

    /// Returns a fresh iterator over the schedule's pay dates.
    ///
    /// Each call starts again at the anchor date, so two calls always yield
    /// identical sequences.
    pub fn pay_dates(&self) -> PayDates {
        PayDates::new(self.anchor_date, self.end_date, self.cadence())
    }

    /// Returns a fresh iterator over the schedule's pay periods.
    pub fn periods(&self) -> impl Iterator<Item = PayPeriod> + '_ {
        self.pay_dates()
            .map(|pay_date| PayPeriod::ending_on(pay_date, self.cadence_days))
    }

    /// The number of pay dates the schedule generates.
    pub fn period_count(&self) -> usize {
        let span = (self.end_date - self.anchor_date).num_days();
        (span / i64::from(self.cadence_days)) as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_roll_back_keeps_matching_weekday() {
        // 2021-10-28 is a Thursday
        assert_eq!(
            roll_back_to_weekday(date(2021, 10, 28), Weekday::Thu),
            Some(date(2021, 10, 28))
        );
    }

    #[test]
    fn test_roll_back_walks_at_most_six_days() {
        // 2025-04-25 is a Friday; the previous Saturday is six days back
        assert_eq!(
            roll_back_to_weekday(date(2025, 4, 25), Weekday::Sat),
            Some(date(2025, 4, 19))
        );
    }

    #[test]
    fn test_new_rolls_end_bound_back_to_anchor_weekday() {
        let schedule = PaySchedule::new(date(2021, 10, 28), 14, date(2025, 4, 30), dec("100"))
            .unwrap();
        assert_eq!(schedule.end_date(), date(2025, 4, 24));
        assert_eq!(schedule.end_date().weekday(), Weekday::Thu);
        assert_eq!(schedule.pay_weekday(), Weekday::Thu);
    }

    #[test]
    fn test_zero_cadence_is_rejected() {
        let result = PaySchedule::new(date(2021, 10, 28), 0, date(2022, 10, 28), dec("100"));
        match result {
            Err(EngineError::InvalidSchedule { field, .. }) => assert_eq!(field, "cadence_days"),
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_cadence_is_rejected() {
        let result = PaySchedule::new(date(2021, 10, 28), -14, date(2022, 10, 28), dec("100"));
        assert!(matches!(
            result,
            Err(EngineError::InvalidSchedule { ref field, .. }) if field == "cadence_days"
        ));
    }

    #[test]
    fn test_oversized_cadence_is_rejected() {
        let result = PaySchedule::new(
            date(2021, 10, 28),
            i64::from(u32::MAX) + 1,
            date(2022, 10, 28),
            dec("100"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cadence_reaching_past_earliest_date_is_rejected() {
        let result = PaySchedule::new(date(2021, 10, 28), 200_000_000, date(2025, 4, 30), dec("100"));
        match result {
            Err(EngineError::InvalidSchedule { field, .. }) => assert_eq!(field, "cadence_days"),
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_end_before_anchor_is_rejected() {
        let result = PaySchedule::new(date(2021, 10, 28), 14, date(2021, 10, 1), dec("100"));
        match result {
            Err(EngineError::InvalidSchedule { field, message }) => {
                assert_eq!(field, "end_date");
                assert!(message.contains("precedes anchor date 2021-10-28"));
            }
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_end_rolling_below_anchor_is_rejected() {
        // 2021-11-03 is a Wednesday; rolling to a Thursday lands before the anchor
        let result = PaySchedule::new(date(2021, 11, 4), 14, date(2021, 11, 3), dec("100"));
        assert!(result.is_err());
    }

    #[test]
    fn test_end_equal_to_anchor_gives_single_period() {
        let schedule =
            PaySchedule::new(date(2021, 10, 28), 14, date(2021, 10, 28), dec("100")).unwrap();
        assert_eq!(schedule.period_count(), 1);
        assert_eq!(schedule.pay_dates().collect::<Vec<_>>(), vec![date(2021, 10, 28)]);
    }

    #[test]
    fn test_negative_gross_is_rejected() {
        let result = PaySchedule::new(date(2021, 10, 28), 14, date(2022, 10, 28), dec("-1"));
        assert!(matches!(
            result,
            Err(EngineError::InvalidSchedule { ref field, .. }) if field == "gross_per_period"
        ));
    }

    #[test]
    fn test_zero_gross_is_accepted() {
        assert!(PaySchedule::new(date(2021, 10, 28), 14, date(2022, 10, 28), Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_period_count_matches_generated_dates() {
        let schedule =
            PaySchedule::new(date(2021, 10, 28), 14, date(2025, 4, 30), dec("100")).unwrap();
        assert_eq!(schedule.period_count(), 92);
        assert_eq!(schedule.pay_dates().count(), 92);
    }

    #[test]
    fn test_periods_follow_pay_dates() {
        let schedule =
            PaySchedule::new(date(2021, 10, 28), 14, date(2021, 12, 31), dec("100")).unwrap();
        let periods: Vec<PayPeriod> = schedule.periods().collect();
        assert_eq!(periods.len(), 5);
        assert_eq!(periods[0].start_date, date(2021, 10, 15));
        assert_eq!(periods[4].pay_date, date(2021, 12, 23));
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start_date, pair[0].end_date + Duration::days(1));
        }
    }
}
