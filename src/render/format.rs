//! Display helpers for renderers.
//!
//! Records carry raw values only; these helpers give renderers the display
//! conventions statements are printed with.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::round_to_cents;

/// Formats an amount as dollars with thousands separators and two decimals.
///
/// # Example
///
/// ```
/// use paystub_engine::render::format_currency;
/// use rust_decimal::Decimal;
///
/// let gross = Decimal::from(90000) / Decimal::from(26);
/// assert_eq!(format_currency(gross), "$3,461.54");
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_cents(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

/// Formats a date the way statements print it: `MM/DD/YYYY`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Escapes text for embedding in HTML or XML markup.
///
/// Party names and addresses come from configuration and must never be
/// interpolated into markup unescaped.
///
/// # Example
///
/// ```
/// use paystub_engine::render::escape_markup;
///
/// assert_eq!(
///     escape_markup(r#"<b>"Smith & Sons"</b>"#),
///     "&lt;b&gt;&quot;Smith &amp; Sons&quot;&lt;/b&gt;"
/// );
/// ```
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
