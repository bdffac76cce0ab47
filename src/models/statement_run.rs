//! Statement run model.
//!
//! A [`StatementRun`] wraps the ordered records of one generation run with
//! identifying metadata, the way a calculation result is stamped before it
//! leaves the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::calculation::generate_records;
use crate::error::EngineResult;

use super::{PaySchedule, PeriodRecord};

/// The version string stamped on every run.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The complete output of one schedule generation.
#[derive(Debug, Clone, Serialize)]
pub struct StatementRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that generated the run.
    pub engine_version: String,
    /// The validated schedule the records were generated from.
    pub schedule: PaySchedule,
    /// One record per pay date, in ascending pay-date order.
    pub records: Vec<PeriodRecord>,
}

impl StatementRun {
    /// Generates every record for `schedule` and stamps the run.
    pub fn generate(schedule: &PaySchedule) -> EngineResult<Self> {
        let records = generate_records(schedule)?;
        Ok(Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            schedule: schedule.clone(),
            records,
        })
    }

    /// The closing YTD total of each calendar year in the run.
    pub fn ytd_by_year(&self) -> BTreeMap<i32, Decimal> {
        self.records
            .iter()
            .map(|record| (record.year(), record.ytd_total))
            .collect()
    }
}
