//! Calculation logic for the pay statement engine.
//!
//! This module contains workday counting, pay date generation at a fixed
//! cadence, and year-to-date accrual with proration across calendar-year
//! boundaries.

mod schedule;
mod workdays;
mod ytd_accrual;

pub use schedule::PayDates;
pub use workdays::{count_workdays, is_workday};
pub use ytd_accrual::{YtdAccrualTracker, generate_records};
