//! Presentation helpers for BRL amounts and percentages
//!
//! The engine emits raw decimals; these functions produce display text in
//! the Brazilian convention (`.` thousands grouping, `,` decimal separator).

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const CURRENCY_SYMBOL: &str = "R$";

/// Format an amount as BRL currency, e.g. `R$ 1.234,56`
pub fn format_currency(value: Decimal) -> String {
    let (negative, body) = localized(value);
    if negative {
        format!("-{} {}", CURRENCY_SYMBOL, body)
    } else {
        format!("{} {}", CURRENCY_SYMBOL, body)
    }
}

/// Format a percentage value (already scaled to 0-100), e.g. `30,00%`
pub fn format_percent(value: Decimal) -> String {
    let (negative, body) = localized(value);
    if negative {
        format!("-{}%", body)
    } else {
        format!("{}%", body)
    }
}

/// Parse currency text typed by a user back into a decimal
///
/// Everything except digits and commas is dropped (symbol, spaces, thousands
/// points), then the comma becomes the decimal point. A leading minus sign is
/// kept. Unparsable input yields zero.
pub fn parse_currency_input(value: &str) -> Decimal {
    let trimmed = value.trim();
    let negative = trimmed.starts_with('-');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let mut parts = cleaned.splitn(2, ',');
    let int_part = parts.next().unwrap_or_default();
    let frac_part: String = parts
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let number = match (int_part.is_empty(), frac_part.is_empty()) {
        (true, true) => return Decimal::ZERO,
        (false, true) => int_part.to_string(),
        (true, false) => format!("0.{}", frac_part),
        (false, false) => format!("{}.{}", int_part, frac_part),
    };

    let parsed = Decimal::from_str(&number).unwrap_or(Decimal::ZERO);
    if negative {
        -parsed
    } else {
        parsed
    }
}

/// Round to cents and render the absolute value with grouping.
/// Returns whether the rounded value is negative.
fn localized(value: Decimal) -> (bool, String) {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    (negative, format!("{},{}", group_thousands(int_part), frac_part))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
