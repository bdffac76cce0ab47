//! Core data models for the pay statement engine.
//!
//! This module contains the schedule configuration, the derived pay periods,
//! the per-period records handed to renderers and the party metadata printed
//! alongside them.

mod parties;
mod pay_period;
mod pay_schedule;
mod period_record;
mod statement_run;

pub use parties::{Employee, Employer, StatementParties};
pub use pay_period::PayPeriod;
pub use pay_schedule::{PaySchedule, roll_back_to_weekday};
pub use period_record::{AccrualBreakdown, PeriodRecord, round_to_cents};
pub use statement_run::{ENGINE_VERSION, StatementRun};
