//! The renderer-facing statement value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PeriodRecord, StatementParties};

/// Artifact name for the statement paid on `pay_date`: `paystub-YYYY-MM-DD`.
///
/// Pay dates in a schedule are strictly increasing, so names never collide
/// within a run.
///
/// # Example
///
/// ```
/// use paystub_engine::render::artifact_name;
/// use chrono::NaiveDate;
///
/// let name = artifact_name(NaiveDate::from_ymd_opt(2022, 1, 6).unwrap());
/// assert_eq!(name, "paystub-2022-01-06");
/// ```
pub fn artifact_name(pay_date: NaiveDate) -> String {
    format!("paystub-{}", pay_date.format("%Y-%m-%d"))
}

/// A single deduction line. Amounts are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// Deduction name as configured.
    pub name: String,
    /// Amount deducted this period.
    pub amount: Decimal,
    /// Amount deducted this year.
    pub ytd_amount: Decimal,
}

/// One period record joined with the fixed party metadata.
///
/// Self-contained: rendering one statement never needs another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStatement {
    /// Deterministic name derived from the pay date.
    pub artifact_name: String,
    /// The accrual output for this period.
    pub record: PeriodRecord,
    /// Employer, employee and payment details.
    pub parties: StatementParties,
    /// Deduction lines, all at zero.
    pub deductions: Vec<DeductionLine>,
    /// Gross amount less deductions.
    pub net_amount: Decimal,
}

impl PayStatement {
    /// Builds the statement for one record.
    pub fn new(record: PeriodRecord, parties: &StatementParties) -> Self {
        let deductions: Vec<DeductionLine> = parties
            .deductions
            .iter()
            .map(|name| DeductionLine {
                name: name.clone(),
                amount: Decimal::ZERO,
                ytd_amount: Decimal::ZERO,
            })
            .collect();
        let deducted: Decimal = deductions.iter().map(|d| d.amount).sum();

        Self {
            artifact_name: artifact_name(record.pay_date),
            net_amount: record.gross_amount - deducted,
            record,
            parties: parties.clone(),
            deductions,
        }
    }

    /// Builds one statement per record, preserving order.
    pub fn for_records(records: Vec<PeriodRecord>, parties: &StatementParties) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| Self::new(record, parties))
            .collect()
    }
}
