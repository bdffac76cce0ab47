//! Pay statement engine
//!
//! This crate generates fixed-cadence pay schedules and the period records
//! behind each pay statement: the workday count of every period and a
//! year-to-date total that apportions straddling periods between calendar
//! years by workdays.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use paystub_engine::calculation::generate_records;
//! use paystub_engine::models::PaySchedule;
//! use rust_decimal::Decimal;
//!
//! let schedule = PaySchedule::new(
//!     NaiveDate::from_ymd_opt(2021, 10, 28).unwrap(),
//!     14,
//!     NaiveDate::from_ymd_opt(2022, 1, 6).unwrap(),
//!     Decimal::from(1500),
//! )?;
//! let records = generate_records(&schedule)?;
//! assert_eq!(records.len(), 6);
//! assert_eq!(records[5].breakdown.workdays_in_year, 4);
//! # Ok::<(), paystub_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
