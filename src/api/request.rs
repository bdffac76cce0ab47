//! Request types for the pay statement engine API.
//!
//! This module defines the JSON request structure shared by the `/schedule`
//! and `/statements` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;

/// Request body describing a pay schedule.
///
/// Give either `gross_per_period`, or `annual_salary` together with
/// `periods_per_year`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The first pay date.
    pub anchor_date: NaiveDate,
    /// Calendar days between pay dates.
    pub cadence_days: i64,
    /// Inclusive end bound.
    pub end_date: NaiveDate,
    /// Fixed gross amount per period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_per_period: Option<Decimal>,
    /// Annual salary to split across periods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_salary: Option<Decimal>,
    /// Number of periods per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods_per_year: Option<u32>,
}

impl From<ScheduleRequest> for ScheduleConfig {
    fn from(req: ScheduleRequest) -> Self {
        ScheduleConfig {
            anchor_date: req.anchor_date,
            cadence_days: req.cadence_days,
            end_date: req.end_date,
            gross_per_period: req.gross_per_period,
            annual_salary: req.annual_salary,
            periods_per_year: req.periods_per_year,
        }
    }
}
