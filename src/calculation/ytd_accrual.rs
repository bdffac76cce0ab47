//! Year-to-date accrual.
//!
//! [`YtdAccrualTracker`] turns pay dates into [`PeriodRecord`]s while keeping
//! a running total per calendar year. A period that starts in December and is
//! paid in January reports its full gross amount, but only the share earned
//! on the new year's workdays is added to the new year's YTD.
//!
//! The tracker is inherently sequential: each record depends on the totals of
//! every earlier period in the same year, so pay dates must be fed in
//! ascending order from a single thread of control.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualBreakdown, PaySchedule, PayPeriod, PeriodRecord};

use super::count_workdays;

/// Running total for the calendar year currently being accrued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearAccrualState {
    year: i32,
    total: Decimal,
}

impl YearAccrualState {
    fn new(year: i32) -> Self {
        Self {
            year,
            total: Decimal::ZERO,
        }
    }
}

/// Accrues year-to-date earnings across a schedule's pay dates.
///
/// # Example
///
/// ```
/// use paystub_engine::calculation::YtdAccrualTracker;
/// use paystub_engine::models::{PaySchedule, round_to_cents};
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
/// let mut tracker = YtdAccrualTracker::new(&schedule);
/// let record = tracker.accrue(schedule.anchor_date())?;
///
/// assert_eq!(record.period_start, NaiveDate::from_ymd_opt(2021, 10, 15).unwrap());
/// assert_eq!(record.breakdown.total_workdays, 10);
/// assert_eq!(round_to_cents(record.ytd_total), Decimal::new(346154, 2));
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct YtdAccrualTracker {
    cadence_days: u32,
    gross_per_period: Decimal,
    state: YearAccrualState,
    last_pay_date: Option<NaiveDate>,
}

impl YtdAccrualTracker {
    /// Creates a tracker positioned on the anchor date's year with a zero
    /// total.
    pub fn new(schedule: &PaySchedule) -> Self {
        Self {
            cadence_days: schedule.cadence_days(),
            gross_per_period: schedule.gross_per_period(),
            state: YearAccrualState::new(schedule.anchor_date().year()),
            last_pay_date: None,
        }
    }

    /// The calendar year currently being accrued.
    pub fn tracked_year(&self) -> i32 {
        self.state.year
    }

    /// The running YTD total for [`tracked_year`](Self::tracked_year).
    pub fn running_total(&self) -> Decimal {
        self.state.total
    }

    /// Accrues one pay date and returns its finalized record.
    ///
    /// When the pay date's year differs from the tracked year, the running
    /// total is reset to zero before the period's own share is added.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfOrderPayDate`] if `pay_date` is not
    /// strictly after the previously accrued pay date, and
    /// [`EngineError::InvalidSchedule`] if the gross amount is too large for
    /// the running total. The tracker is left unchanged in both cases.
    pub fn accrue(&mut self, pay_date: NaiveDate) -> EngineResult<PeriodRecord> {
        if let Some(previous) = self.last_pay_date {
            if pay_date <= previous {
                return Err(EngineError::OutOfOrderPayDate {
                    previous,
                    received: pay_date,
                });
            }
        }

        let period = PayPeriod::ending_on(pay_date, self.cadence_days);
        let total_workdays = count_workdays(period.start_date, pay_date);

        let year_rollover = pay_date.year() != self.state.year;
        let mut state = if year_rollover {
            YearAccrualState::new(pay_date.year())
        } else {
            self.state
        };

        let year_start = NaiveDate::from_ymd_opt(state.year, 1, 1).unwrap_or(period.start_date);
        let effective_start = period.start_date.max(year_start);
        let workdays_in_year = count_workdays(effective_start, pay_date);

        let (fraction, accrued_share) = self
            .apportion(workdays_in_year, total_workdays)
            .ok_or_else(|| overflow(pay_date))?;
        state.total = state
            .total
            .checked_add(accrued_share)
            .ok_or_else(|| overflow(pay_date))?;

        if year_rollover {
            info!(
                previous_year = self.state.year,
                closing_ytd = %self.state.total,
                new_year = pay_date.year(),
                "Year rollover; resetting YTD"
            );
        }
        self.state = state;
        self.last_pay_date = Some(pay_date);

        debug!(
            pay_date = %pay_date,
            period_start = %period.start_date,
            total_workdays,
            workdays_in_year,
            fraction = %fraction,
            ytd = %self.state.total,
            "Accrued period"
        );

        Ok(PeriodRecord {
            period_start: period.start_date,
            period_end: period.end_date,
            pay_date,
            gross_amount: self.gross_per_period,
            ytd_total: self.state.total,
            breakdown: AccrualBreakdown {
                total_workdays,
                workdays_in_year,
                fraction,
                accrued_share,
                prior_year_share: self.gross_per_period - accrued_share,
                year_rollover,
            },
        })
    }

    /// Splits the gross amount by workdays. A period without workdays
    /// accrues nothing. `None` on decimal overflow.
    fn apportion(&self, workdays_in_year: u32, total_workdays: u32) -> Option<(Decimal, Decimal)> {
        if total_workdays == 0 {
            return Some((Decimal::ZERO, Decimal::ZERO));
        }
        if workdays_in_year >= total_workdays {
            return Some((Decimal::ONE, self.gross_per_period));
        }
        let in_year = Decimal::from(workdays_in_year);
        let total = Decimal::from(total_workdays);
        let share = self
            .gross_per_period
            .checked_mul(in_year)?
            .checked_div(total)?;
        Some((in_year / total, share))
    }
}

fn overflow(pay_date: NaiveDate) -> EngineError {
    EngineError::invalid_schedule(
        "gross_per_period",
        format!("year-to-date total overflows at pay date {}", pay_date),
    )
}

/// Runs a schedule end to end: every pay date through one tracker, in order.
///
/// # Example
///
/// ```
/// use paystub_engine::calculation::generate_records;
/// use paystub_engine::models::{PaySchedule, round_to_cents};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let schedule = PaySchedule::new(
///     NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
///     14,
///     NaiveDate::from_ymd_opt(2022, 1, 6).unwrap(),
///     Decimal::from(90000) / Decimal::from(26),
/// )?;
///
/// let records = generate_records(&schedule)?;
/// let january = records.last().unwrap();
///
/// assert_eq!(january.breakdown.workdays_in_year, 4);
/// assert_eq!(round_to_cents(january.ytd_total), Decimal::new(138462, 2));
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
pub fn generate_records(schedule: &PaySchedule) -> EngineResult<Vec<PeriodRecord>> {
    let mut tracker = YtdAccrualTracker::new(schedule);
    let records = schedule
        .pay_dates()
        .map(|pay_date| tracker.accrue(pay_date))
        .collect::<EngineResult<Vec<_>>>()?;

    info!(
        anchor_date = %schedule.anchor_date(),
        end_date = %schedule.end_date(),
        cadence_days = schedule.cadence_days(),
        periods = records.len(),
        "Generated period records"
    );

    Ok(records)
}
