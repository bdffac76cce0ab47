//! Statement party metadata.
//!
//! The fixed employer and employee details printed on every statement. These
//! are constants for a run and are loaded from configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The paying organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// Legal or trading name.
    pub name: String,
    /// Postal address on a single line.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional logo location for renderers that show one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// The salaried worker the statements are issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Full name.
    pub name: String,
    /// Postal address on a single line.
    pub address: String,
    /// Job title.
    pub position: String,
}

/// Everything a renderer needs besides the [`PeriodRecord`](super::PeriodRecord).
///
/// # Example
///
/// ```
/// use paystub_engine::models::{Employee, Employer, StatementParties};
/// use rust_decimal::Decimal;
///
/// let parties = StatementParties {
///     employer: Employer {
///         name: "Northwind Ltd.".to_string(),
///         address: "1 Harbour St, Toronto".to_string(),
///         phone: "(416) 555-0100".to_string(),
///         logo_url: None,
///     },
///     employee: Employee {
///         name: "Sam Doe".to_string(),
///         address: "22 Elm Rd, Delhi".to_string(),
///         position: "Software Engineer".to_string(),
///     },
///     pay_method: "Electronic Transfer".to_string(),
///     regular_hours: Decimal::from(80),
///     deductions: vec!["Federal Tax".to_string()],
///     contact: None,
/// };
/// assert_eq!(parties.deductions.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementParties {
    /// The employer.
    pub employer: Employer,
    /// The employee.
    pub employee: Employee,
    /// How the net amount is paid (e.g., "Electronic Transfer").
    pub pay_method: String,
    /// Regular hours reported per period.
    #[serde(default = "default_regular_hours")]
    pub regular_hours: Decimal,
    /// Deduction line items. Always shown at zero.
    #[serde(default)]
    pub deductions: Vec<String>,
    /// Optional footer line for enquiries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

fn default_regular_hours() -> Decimal {
    Decimal::from(80)
}
