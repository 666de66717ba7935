//! Lenient conversion of raw form fields into a [`LoanInput`].
//!
//! Form inputs arrive as free text. Currency boxes are sanitised to their
//! digits (so `"$450,000"` reads as 450000), rate boxes take the leading
//! numeric prefix (`"6.5%"` reads as 6.5), and anything unreadable becomes
//! zero. Parsing never fails; rejecting bad values is left to
//! [`calculator::compute`](super::calculator::compute).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::calculator::{LoanInput, DEFAULT_LOAN_TERM_YEARS};
use crate::types::{Money, Percent};

/// Loan form fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLoanInput {
    pub home_price: String,
    pub down_payment: String,
    pub loan_term_years: String,
    pub annual_interest_rate_percent: String,
    pub annual_property_tax: String,
    pub annual_home_insurance: String,
    pub pmi_annual_rate_percent: String,
}

impl RawLoanInput {
    pub fn parse(&self) -> LoanInput {
        LoanInput {
            home_price: parse_currency(&self.home_price),
            down_payment: parse_currency(&self.down_payment),
            loan_term_years: parse_term(&self.loan_term_years),
            annual_interest_rate_percent: parse_percent(&self.annual_interest_rate_percent),
            annual_property_tax: parse_currency(&self.annual_property_tax),
            annual_home_insurance: parse_currency(&self.annual_home_insurance),
            pmi_annual_rate_percent: parse_percent(&self.pmi_annual_rate_percent),
        }
    }
}

impl From<&LoanInput> for RawLoanInput {
    fn from(input: &LoanInput) -> Self {
        RawLoanInput {
            home_price: input.home_price.normalize().to_string(),
            down_payment: input.down_payment.normalize().to_string(),
            loan_term_years: input.loan_term_years.to_string(),
            annual_interest_rate_percent: input.annual_interest_rate_percent.normalize().to_string(),
            annual_property_tax: input.annual_property_tax.normalize().to_string(),
            annual_home_insurance: input.annual_home_insurance.normalize().to_string(),
            pmi_annual_rate_percent: input.pmi_annual_rate_percent.normalize().to_string(),
        }
    }
}

/// Keep only ASCII digits, dropping leading zeros.
pub fn sanitize_currency(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn parse_currency(raw: &str) -> Money {
    let digits = sanitize_currency(raw);
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}

pub fn parse_percent(raw: &str) -> Percent {
    leading_number(raw)
        .and_then(|s| Decimal::from_str(&s).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Leading whole number of years; falls back to the default term when the
/// field is empty, unreadable or zero.
pub fn parse_term(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    match trimmed[..end].parse::<u32>() {
        Ok(0) | Err(_) => DEFAULT_LOAN_TERM_YEARS,
        Ok(years) => years,
    }
}

/// Longest prefix of the form `[+-]digits[.digits]` after leading
/// whitespace, rewritten so that `.5` and `-.5` carry a leading zero.
fn leading_number(raw: &str) -> Option<String> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let int_part = &rest[..int_len];

    let frac_part = rest[int_len..].strip_prefix('.').map(|after| {
        let frac_len = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        &after[..frac_len]
    });

    let mut number = String::new();
    if negative {
        number.push('-');
    }
    match (int_part.is_empty(), frac_part) {
        (true, None) | (true, Some("")) => return None,
        (true, Some(frac)) => {
            number.push_str("0.");
            number.push_str(frac);
        }
        (false, Some(frac)) if !frac.is_empty() => {
            number.push_str(int_part);
            number.push('.');
            number.push_str(frac);
        }
        (false, _) => number.push_str(int_part),
    }
    Some(number)
}
