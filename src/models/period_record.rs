//! Period record models.
//!
//! A [`PeriodRecord`] is the finalized output of the accrual stage for one
//! pay date. It is the only value handed to a renderer and carries no
//! formatting or layout information.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// Rounds a monetary amount to cents, midpoint away from zero.
///
/// # Example
///
/// ```
/// use paystub_engine::models::round_to_cents;
/// use rust_decimal::Decimal;
///
/// let gross = Decimal::from(90000) / Decimal::from(26);
/// assert_eq!(round_to_cents(gross), Decimal::new(346154, 2));
/// assert_eq!(round_to_cents(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// How one period's gross amount was apportioned to the pay date's year.
///
/// `accrued_share + prior_year_share` recombines to `gross_amount` for every
/// record, up to decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualBreakdown {
    /// Weekdays in the whole period.
    pub total_workdays: u32,
    /// Weekdays in the period that fall in the pay date's calendar year.
    pub workdays_in_year: u32,
    /// `workdays_in_year / total_workdays`, or zero for a period with no
    /// weekdays.
    pub fraction: Decimal,
    /// The part of the gross amount added to this year's YTD.
    pub accrued_share: Decimal,
    /// The part of the gross amount not added to this year's YTD: the share
    /// earned on the previous year's workdays, or the whole amount for a
    /// period without workdays.
    pub prior_year_share: Decimal,
    /// True when this period is the first one paid in a new calendar year.
    pub year_rollover: bool,
}

/// The finalized record for one pay date.
///
/// # Example
///
/// ```
/// use paystub_engine::models::{AccrualBreakdown, PeriodRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = PeriodRecord {
///     period_start: NaiveDate::from_ymd_opt(2021, 10, 15).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
///     pay_date: NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
///     gross_amount: Decimal::new(346153, 2),
///     ytd_total: Decimal::new(346153, 2),
///     breakdown: AccrualBreakdown {
///         total_workdays: 10,
///         workdays_in_year: 10,
///         fraction: Decimal::ONE,
///         accrued_share: Decimal::new(346153, 2),
///         prior_year_share: Decimal::ZERO,
///         year_rollover: false,
///     },
/// };
///
/// assert_eq!(record.year(), 2021);
/// assert_eq!(record.period().length_days(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive). Equal to the pay date.
    pub period_end: NaiveDate,
    /// The date the period is paid.
    pub pay_date: NaiveDate,
    /// The full gross amount for the period, before any apportionment.
    pub gross_amount: Decimal,
    /// Year-to-date earnings for the pay date's calendar year, unrounded.
    pub ytd_total: Decimal,
    /// How the gross amount was apportioned across calendar years.
    pub breakdown: AccrualBreakdown,
}

impl PeriodRecord {
    /// The calendar year the YTD total belongs to.
    pub fn year(&self) -> i32 {
        self.pay_date.year()
    }

    /// The pay period this record settles.
    pub fn period(&self) -> PayPeriod {
        PayPeriod {
            start_date: self.period_start,
            end_date: self.period_end,
            pay_date: self.pay_date,
        }
    }

    /// Gross amount rounded to cents.
    pub fn gross_rounded(&self) -> Decimal {
        round_to_cents(self.gross_amount)
    }

    /// YTD total rounded to cents.
    pub fn ytd_rounded(&self) -> Decimal {
        round_to_cents(self.ytd_total)
    }
}
