//! Configuration types for the pay statement engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PaySchedule, StatementParties};

/// The `schedule` section: raw, unvalidated schedule settings.
///
/// The gross amount per period is given either directly
/// (`gross_per_period`) or as an annual salary split evenly over
/// `periods_per_year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// The first pay date.
    pub anchor_date: NaiveDate,
    /// Calendar days between pay dates.
    pub cadence_days: i64,
    /// Inclusive end bound; rolled back to the anchor's weekday.
    pub end_date: NaiveDate,
    /// Fixed gross amount per period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_per_period: Option<Decimal>,
    /// Annual salary to split across periods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_salary: Option<Decimal>,
    /// Number of periods the annual salary is split across.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods_per_year: Option<u32>,
}

impl ScheduleConfig {
    /// Resolves the gross amount paid each period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if both or neither of
    /// `gross_per_period` and `annual_salary` are set, or if
    /// `periods_per_year` is missing or zero when `annual_salary` is used.
    ///
    /// # Example
    ///
    /// ```
    /// use paystub_engine::config::ScheduleConfig;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let config = ScheduleConfig {
    ///     anchor_date: NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
    ///     cadence_days: 14,
    ///     end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
    ///     gross_per_period: None,
    ///     annual_salary: Some(Decimal::from(90000)),
    ///     periods_per_year: Some(26),
    /// };
    /// assert_eq!(config.gross_per_period()?, Decimal::from(90000) / Decimal::from(26));
    /// # Ok::<(), paystub_engine::error::EngineError>(())
    /// ```
    pub fn gross_per_period(&self) -> EngineResult<Decimal> {
        match (self.gross_per_period, self.annual_salary) {
            (Some(gross), None) => Ok(gross),
            (None, Some(annual)) => {
                let periods = self.periods_per_year.ok_or_else(|| {
                    EngineError::invalid_schedule(
                        "periods_per_year",
                        "required when annual_salary is set",
                    )
                })?;
                if periods == 0 {
                    return Err(EngineError::invalid_schedule(
                        "periods_per_year",
                        "must be greater than zero",
                    ));
                }
                Ok(annual / Decimal::from(periods))
            }
            (Some(_), Some(_)) => Err(EngineError::invalid_schedule(
                "gross_per_period",
                "set either gross_per_period or annual_salary, not both",
            )),
            (None, None) => Err(EngineError::invalid_schedule(
                "gross_per_period",
                "one of gross_per_period or annual_salary is required",
            )),
        }
    }

    /// Validates the section into a [`PaySchedule`].
    pub fn build(&self) -> EngineResult<PaySchedule> {
        PaySchedule::new(
            self.anchor_date,
            self.cadence_days,
            self.end_date,
            self.gross_per_period()?,
        )
    }
}

/// The complete configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaystubConfig {
    /// Schedule settings.
    pub schedule: ScheduleConfig,
    /// Party metadata printed on every statement.
    pub parties: StatementParties,
}
