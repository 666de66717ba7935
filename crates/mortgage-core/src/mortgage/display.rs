use rust_decimal::{Decimal, RoundingStrategy};

use super::calculator::AmortizationResult;
use crate::types::Money;

/// Format `amount` as whole US dollars, e.g. `$2,528` or `-$1,200`.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().normalize().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Labelled display strings for each result figure, in presentation order.
pub fn format_result(result: &AmortizationResult) -> Vec<(&'static str, String)> {
    vec![
        ("monthly_payment", format_currency(result.monthly_payment)),
        (
            "monthly_principal_interest",
            format_currency(result.monthly_principal_interest),
        ),
        ("monthly_tax", format_currency(result.monthly_tax)),
        ("monthly_insurance", format_currency(result.monthly_insurance)),
        ("monthly_pmi", format_currency(result.monthly_pmi)),
        ("total_interest", format_currency(result.total_interest)),
        ("total_amount", format_currency(result.total_amount)),
        ("loan_amount", format_currency(result.loan_amount)),
    ]
}
