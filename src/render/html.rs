//! File-backed HTML renderer.
//!
//! Produces the printable "Statement of Earnings" page. Every piece of party
//! text is passed through [`escape_markup`] before it is written.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

use super::{
    DocumentRenderer, PayStatement, RenderedArtifact, escape_markup, format_currency,
    format_display_date,
};

const STYLE: &str = "\
body { font-family: sans-serif; color: #333; max-width: 800px; margin: 20px auto; padding: 20px; }
h2 { text-align: center; border-bottom: 3px solid #4a90e2; padding-bottom: 10px; }
table { width: 100%; border-collapse: collapse; margin-bottom: 16px; }
th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #e3efff; text-transform: uppercase; }
.right { text-align: right; }";

/// Writes each statement as a standalone HTML page to
/// `<output_dir>/<artifact_name>.html`.
#[derive(Debug, Clone)]
pub struct HtmlStatementRenderer {
    output_dir: PathBuf,
}

impl HtmlStatementRenderer {
    /// Creates a renderer writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The path the statement with `artifact_name` is written to.
    pub fn path_for(&self, artifact_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", artifact_name))
    }

    /// Builds the page for one statement.
    ///
    /// # Example
    ///
    /// ```
    /// use paystub_engine::render::{HtmlStatementRenderer, PayStatement};
    /// # use paystub_engine::models::*;
    /// # use chrono::NaiveDate;
    /// # use rust_decimal::Decimal;
    /// # let pay_date = NaiveDate::from_ymd_opt(2022, 1, 6).unwrap();
    /// # let record = PeriodRecord {
    /// #     period_start: NaiveDate::from_ymd_opt(2021, 12, 24).unwrap(),
    /// #     period_end: pay_date,
    /// #     pay_date,
    /// #     gross_amount: Decimal::from(3000),
    /// #     ytd_total: Decimal::from(1200),
    /// #     breakdown: AccrualBreakdown {
    /// #         total_workdays: 10,
    /// #         workdays_in_year: 4,
    /// #         fraction: Decimal::new(4, 1),
    /// #         accrued_share: Decimal::from(1200),
    /// #         prior_year_share: Decimal::from(1800),
    /// #         year_rollover: true,
    /// #     },
    /// # };
    /// # let parties = StatementParties {
    /// #     employer: Employer {
    /// #         name: "Smith & Sons".to_string(),
    /// #         address: "1 Harbour St".to_string(),
    /// #         phone: "555-0100".to_string(),
    /// #         logo_url: None,
    /// #     },
    /// #     employee: Employee {
    /// #         name: "Sam Doe".to_string(),
    /// #         address: "22 Elm Rd".to_string(),
    /// #         position: "Engineer".to_string(),
    /// #     },
    /// #     pay_method: "Cheque".to_string(),
    /// #     regular_hours: Decimal::from(80),
    /// #     deductions: vec![],
    /// #     contact: None,
    /// # };
    /// let statement = PayStatement::new(record, &parties);
    /// let page = HtmlStatementRenderer::page(&statement);
    ///
    /// assert!(page.contains("Smith &amp; Sons"));
    /// assert!(page.contains("$1,200.00"));
    /// ```
    pub fn page(statement: &PayStatement) -> String {
        let record = &statement.record;
        let parties = &statement.parties;
        let gross = format_currency(record.gross_amount);
        let ytd = format_currency(record.ytd_total);

        let mut html = String::with_capacity(4096);
        // Writing into a String cannot fail.
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <title>Pay Stub - {title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
             <h2>Statement of Earnings</h2>\n",
            title = long_date(record.pay_date),
        );

        let _ = write!(
            html,
            "<table>\n<tr><th>Employer</th><th>Employee</th><th>Pay Details</th></tr>\n<tr>\n\
             <td><b>{employer}</b><br>{employer_address}<br>Phone: {phone}</td>\n\
             <td><b>{employee}</b><br>{employee_address}<br>{position}</td>\n\
             <td><b>Pay Period:</b> {start} to {end}<br><b>Pay Date:</b> {pay_date}<br>\
             <b>Pay Total:</b> {net}<br><b>Paid By:</b> {method}</td>\n</tr>\n</table>\n",
            employer = escape_markup(&parties.employer.name),
            employer_address = escape_markup(&parties.employer.address),
            phone = escape_markup(&parties.employer.phone),
            employee = escape_markup(&parties.employee.name),
            employee_address = escape_markup(&parties.employee.address),
            position = escape_markup(&parties.employee.position),
            start = format_display_date(record.period_start),
            end = format_display_date(record.period_end),
            pay_date = format_display_date(record.pay_date),
            net = format_currency(statement.net_amount),
            method = escape_markup(&parties.pay_method),
        );

        let _ = write!(
            html,
            "<h3>Earnings</h3>\n<table>\n\
             <tr><th>Description</th><th class=\"right\">Amount</th><th class=\"right\">Year to Date</th></tr>\n\
             <tr><td>Gross Income</td><td class=\"right\">{gross}</td><td class=\"right\">{ytd}</td></tr>\n\
             <tr><td>Regular Pay</td><td class=\"right\">{gross}</td><td class=\"right\">{ytd}</td></tr>\n\
             </table>\n",
        );

        if !statement.deductions.is_empty() {
            html.push_str(
                "<h3>Deductions</h3>\n<table>\n<tr><th>Description</th>\
                 <th class=\"right\">Amount</th><th class=\"right\">Year to Date</th></tr>\n",
            );
            for line in &statement.deductions {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td class=\"right\">{}</td><td class=\"right\">{}</td></tr>",
                    escape_markup(&line.name),
                    format_currency(line.amount),
                    format_currency(line.ytd_amount),
                );
            }
            html.push_str("</table>\n");
        }

        let _ = write!(
            html,
            "<h3>Additional Information</h3>\n<table>\n\
             <tr><th>Regular Hours Worked</th><th class=\"right\">{:.2}</th></tr>\n</table>\n",
            parties.regular_hours,
        );

        if let Some(contact) = &parties.contact {
            let _ = writeln!(html, "<p>{}</p>", escape_markup(contact));
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

impl DocumentRenderer for HtmlStatementRenderer {
    async fn render(&self, statement: &PayStatement) -> EngineResult<RenderedArtifact> {
        let failed = |message: String| EngineError::RenderFailed {
            artifact: statement.artifact_name.clone(),
            message,
        };

        let body = Self::page(statement);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| failed(format!("{}: {}", self.output_dir.display(), e)))?;

        let path = self.path_for(&statement.artifact_name);
        tokio::fs::write(&path, body.as_bytes())
            .await
            .map_err(|e| failed(format!("{}: {}", path.display(), e)))?;

        Ok(RenderedArtifact {
            artifact_name: statement.artifact_name.clone(),
            location: path.display().to_string(),
            bytes: body.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::statement::tests::{sample_parties, sample_record};

    fn statement_on(y: i32, m: u32, d: u32) -> PayStatement {
        PayStatement::new(
            sample_record(NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            &sample_parties(),
        )
    }

    #[test]
    fn test_page_escapes_party_text() {
        let mut parties = sample_parties();
        parties.employer.name = "<script>alert('x')</script>".to_string();
        parties.employee.address = "12 \"Oak\" & Pine".to_string();
        let statement = PayStatement::new(
            sample_record(NaiveDate::from_ymd_opt(2022, 1, 6).unwrap()),
            &parties,
        );

        let page = HtmlStatementRenderer::page(&statement);

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(page.contains("12 &quot;Oak&quot; &amp; Pine"));
    }

    #[test]
    fn test_page_uses_display_formats() {
        let page = HtmlStatementRenderer::page(&statement_on(2022, 1, 6));

        assert!(page.contains("<title>Pay Stub - January 06, 2022</title>"));
        assert!(page.contains("12/24/2021 to 01/06/2022"));
        assert!(page.contains("$3,000.00"));
        assert!(page.contains("<th class=\"right\">80.00</th>"));
    }

    #[test]
    fn test_page_lists_deductions_at_zero() {
        let page = HtmlStatementRenderer::page(&statement_on(2022, 1, 6));
        assert!(page.contains("<td>Federal Tax</td><td class=\"right\">$0.00</td>"));
        assert!(page.contains("<td>Provincial Tax</td>"));
    }

    #[tokio::test]
    async fn test_writes_page_named_by_pay_date() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = HtmlStatementRenderer::new(dir.path().join("paystubs"));

        let artifact = renderer.render(&statement_on(2022, 1, 6)).await.unwrap();

        let path = dir.path().join("paystubs").join("paystub-2022-01-06.html");
        assert_eq!(artifact.location, path.display().to_string());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.len() as u64, artifact.bytes);
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
