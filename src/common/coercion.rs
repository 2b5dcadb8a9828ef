//! Numeric coercion for user-entered values
//!
//! Form fields arrive either as numbers or as free text typed by the user
//! (often with a decimal comma, e.g. `"79,90"`). Everything is normalized to
//! a [`Decimal`]; anything that cannot be read as a number becomes zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A raw numeric field: already a number, or text still being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(Decimal),
    Text(String),
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        NumericInput::Number(value)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        // NaN and infinities have no decimal representation
        NumericInput::Number(Decimal::try_from(value).unwrap_or(Decimal::ZERO))
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(Decimal::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl NumericInput {
    /// Normalize to a decimal, see [`to_decimal`]
    pub fn value(&self) -> Decimal {
        match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => parse_text(s),
        }
    }
}

/// Convert a number or text into a decimal
///
/// Numbers are returned unchanged. For text, the first decimal comma is
/// replaced with a point and the longest leading numeric prefix is parsed.
/// Empty or unparsable input yields exactly zero; this never fails.
pub fn to_decimal(value: impl Into<NumericInput>) -> Decimal {
    value.into().value()
}

fn parse_text(text: &str) -> Decimal {
    let normalized = text.trim().replacen(',', ".", 1);
    numeric_prefix(&normalized)
        .and_then(|prefix| {
            if prefix.contains(['e', 'E']) {
                Decimal::from_scientific(&prefix).ok()
            } else {
                Decimal::from_str(&prefix).ok()
            }
        })
        .unwrap_or(Decimal::ZERO)
}

/// Extract `[sign] digits [. digits] [e [sign] digits]` from the start of
/// the text, rewritten into a form `Decimal` accepts (`".5"` -> `"0.5"`).
fn numeric_prefix(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut out = String::new();

    match bytes.first() {
        Some(b'-') => {
            out.push('-');
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &text[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &text[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    // Exponent only counts when at least one digit follows it
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        let mut exponent = String::from("e");
        if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
            if bytes[end] == b'-' {
                exponent.push('-');
            }
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent.push_str(&text[digits_start..end]);
            out.push_str(&exponent);
        }
    }

    Some(out)
}
