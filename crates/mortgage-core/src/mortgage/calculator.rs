//! Fixed-rate mortgage amortization summary.
//!
//! Maps a [`LoanInput`] to the monthly principal & interest, escrow
//! components (property tax, home insurance), PMI and lifetime totals.
//! [`compute`] is a pure function; [`analyze_mortgage`] wraps it in the
//! standard computation envelope with warnings and timing metadata.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::down_payment;
use crate::error::MortgageError;
use crate::time_value::level_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Down payment share (percent of home price) at or above which PMI is waived.
pub const PMI_WAIVER_THRESHOLD_PERCENT: Percent = dec!(20);

/// Loan terms offered by the calculator, in years.
pub const STANDARD_LOAN_TERMS: [u32; 3] = [15, 20, 30];

pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;

pub const MIN_LOAN_TERM_YEARS: u32 = 1;
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Annual rate above which a warning is attached to the analysis.
const HIGH_RATE_WARNING_PERCENT: Percent = dec!(20);

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Loan parameters for a single calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Purchase price of the home.
    pub home_price: Money,
    /// Cash paid up front; must be below the home price.
    pub down_payment: Money,
    /// Loan term in whole years.
    pub loan_term_years: u32,
    /// Annual interest rate in percent (6.5 = 6.5%).
    pub annual_interest_rate_percent: Percent,
    /// Yearly property tax.
    pub annual_property_tax: Money,
    /// Yearly homeowner's insurance premium.
    pub annual_home_insurance: Money,
    /// Annual PMI rate in percent of the loan amount.
    pub pmi_annual_rate_percent: Percent,
}

impl Default for LoanInput {
    fn default() -> Self {
        LoanInput {
            home_price: dec!(500_000),
            down_payment: dec!(100_000),
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            annual_interest_rate_percent: dec!(6.5),
            annual_property_tax: dec!(6000),
            annual_home_insurance: dec!(1200),
            pmi_annual_rate_percent: dec!(0.5),
        }
    }
}

/// Monthly and aggregate figures for a validated loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub loan_amount: Money,
    pub monthly_principal_interest: Money,
    pub monthly_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_pmi: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_amount: Money,
}

impl AmortizationResult {
    /// All-zero result, shown after the calculator is reset.
    pub fn zeroed() -> Self {
        AmortizationResult {
            loan_amount: Decimal::ZERO,
            monthly_principal_interest: Decimal::ZERO,
            monthly_tax: Decimal::ZERO,
            monthly_insurance: Decimal::ZERO,
            monthly_pmi: Decimal::ZERO,
            monthly_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }
}

/// Amortization summary plus the intermediate values it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageAnalysis {
    #[serde(flatten)]
    pub amortization: AmortizationResult,
    /// Down payment as a percentage of the home price.
    pub down_payment_percent: Percent,
    pub number_of_payments: u32,
    /// Periodic (monthly) interest rate as a decimal.
    pub monthly_rate: Rate,
    pub pmi_required: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the amortization summary for `input`.
///
/// Validation fails fast on the first problem: home price, then down
/// payment against home price, then interest rate, then term and the
/// non-negative amounts.
pub fn compute(input: &LoanInput) -> MortgageResult<AmortizationResult> {
    validate(input)?;
    Ok(compute_validated(input)?.amortization)
}

/// Compute the amortization summary wrapped in the standard output envelope.
pub fn analyze_mortgage(input: &LoanInput) -> MortgageResult<ComputationOutput<MortgageAnalysis>> {
    let start = Instant::now();
    validate(input)?;

    let analysis = compute_validated(input)?;
    let warnings = collect_warnings(input, &analysis);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Mortgage Amortization (level-payment annuity)",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(input: &LoanInput) -> MortgageResult<()> {
    if input.home_price <= Decimal::ZERO {
        return Err(MortgageError::InvalidHomePrice);
    }
    if input.down_payment >= input.home_price {
        return Err(MortgageError::DownPaymentTooLarge);
    }
    if input.annual_interest_rate_percent <= Decimal::ZERO {
        return Err(MortgageError::InvalidInterestRate);
    }

    if !(MIN_LOAN_TERM_YEARS..=MAX_LOAN_TERM_YEARS).contains(&input.loan_term_years) {
        return Err(MortgageError::InvalidInput {
            field: "loan_term_years".into(),
            reason: format!(
                "Loan term must be between {MIN_LOAN_TERM_YEARS} and {MAX_LOAN_TERM_YEARS} years"
            ),
        });
    }

    let non_negative = [
        ("down_payment", input.down_payment),
        ("annual_property_tax", input.annual_property_tax),
        ("annual_home_insurance", input.annual_home_insurance),
        ("pmi_annual_rate_percent", input.pmi_annual_rate_percent),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: field.into(),
                reason: "Value cannot be negative".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

fn compute_validated(input: &LoanInput) -> MortgageResult<MortgageAnalysis> {
    let loan_amount = input.home_price - input.down_payment;
    let monthly_rate = input.annual_interest_rate_percent / dec!(100) / MONTHS_PER_YEAR;
    let number_of_payments = input.loan_term_years * 12;
    let periods = Decimal::from(number_of_payments);

    let monthly_principal_interest = level_payment(monthly_rate, number_of_payments, loan_amount)?;

    let monthly_tax = input.annual_property_tax / MONTHS_PER_YEAR;
    let monthly_insurance = input.annual_home_insurance / MONTHS_PER_YEAR;

    let down_payment_percent =
        down_payment::down_payment_percent(input.home_price, input.down_payment)?;
    let pmi_required = down_payment_percent < PMI_WAIVER_THRESHOLD_PERCENT;
    let monthly_pmi = if pmi_required {
        checked_mul(loan_amount, input.pmi_annual_rate_percent, "monthly PMI")? / dec!(100)
            / MONTHS_PER_YEAR
    } else {
        Decimal::ZERO
    };

    let monthly_payment = [
        monthly_principal_interest,
        monthly_tax,
        monthly_insurance,
        monthly_pmi,
    ]
    .into_iter()
    .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
    .ok_or_else(|| MortgageError::Overflow {
        context: "monthly payment".into(),
    })?;

    let total_interest =
        checked_mul(monthly_principal_interest, periods, "total interest")? - loan_amount;
    let total_amount = checked_mul(monthly_payment, periods, "total amount")?;

    Ok(MortgageAnalysis {
        amortization: AmortizationResult {
            loan_amount,
            monthly_principal_interest,
            monthly_tax,
            monthly_insurance,
            monthly_pmi,
            monthly_payment,
            total_interest,
            total_amount,
        },
        down_payment_percent,
        number_of_payments,
        monthly_rate,
        pmi_required,
    })
}

fn checked_mul(a: Decimal, b: Decimal, context: &str) -> MortgageResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| MortgageError::Overflow {
        context: context.into(),
    })
}

fn collect_warnings(input: &LoanInput, analysis: &MortgageAnalysis) -> Vec<String> {
    let mut warnings = Vec::new();

    if !STANDARD_LOAN_TERMS.contains(&input.loan_term_years) {
        warnings.push(format!(
            "Loan term of {} years is not one of the standard terms (15, 20, 30)",
            input.loan_term_years
        ));
    }
    if analysis.pmi_required {
        if input.pmi_annual_rate_percent.is_zero() {
            warnings.push(
                "Down payment is below 20% but no PMI rate was supplied; PMI is omitted".into(),
            );
        }
    } else {
        warnings.push(format!(
            "PMI waived: down payment of {}% is at or above 20%",
            analysis.down_payment_percent.round_dp(2).normalize()
        ));
    }
    if input.annual_interest_rate_percent > HIGH_RATE_WARNING_PERCENT {
        warnings.push(format!(
            "Interest rate of {}% is unusually high",
            input.annual_interest_rate_percent
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff={}, tol={})",
            msg,
            expected,
            actual,
            diff,
            tol
        );
    }

    fn low_down_payment_input() -> LoanInput {
        LoanInput {
            home_price: dec!(300_000),
            down_payment: dec!(30_000),
            loan_term_years: 30,
            annual_interest_rate_percent: dec!(7),
            annual_property_tax: dec!(3600),
            annual_home_insurance: dec!(1200),
            pmi_annual_rate_percent: dec!(0.6),
        }
    }

    #[test]
    fn test_default_loan() {
        let result = compute(&LoanInput::default()).unwrap();

        assert_eq!(result.loan_amount, dec!(400_000));
        assert_eq!(result.monthly_tax, dec!(500));
        assert_eq!(result.monthly_insurance, dec!(100));
        // Exactly 20% down: PMI waived
        assert_eq!(result.monthly_pmi, Decimal::ZERO);
        assert_close(
            result.monthly_principal_interest,
            dec!(2528.27),
            TOL,
            "P&I at 6.5% over 360 months",
        );
        assert_close(result.monthly_payment, dec!(3128.27), TOL, "monthly payment");
    }

    #[test]
    fn test_monthly_payment_is_sum_of_components() {
        let r = compute(&low_down_payment_input()).unwrap();
        assert_eq!(
            r.monthly_payment,
            r.monthly_principal_interest + r.monthly_tax + r.monthly_insurance + r.monthly_pmi
        );
    }

    #[test]
    fn test_pmi_applied_below_threshold() {
        let r = compute(&low_down_payment_input()).unwrap();
        // 270,000 * 0.6% / 12 = 135
        assert_eq!(r.monthly_pmi, dec!(135));
    }

    #[test]
    fn test_pmi_waived_at_exact_threshold() {
        let mut input = low_down_payment_input();
        input.down_payment = dec!(60_000);
        let r = compute(&input).unwrap();
        assert_eq!(r.monthly_pmi, Decimal::ZERO);
    }

    #[test]
    fn test_pmi_applied_just_below_threshold() {
        let mut input = low_down_payment_input();
        input.down_payment = dec!(59_999);
        let r = compute(&input).unwrap();
        assert!(r.monthly_pmi > Decimal::ZERO);
    }

    #[test]
    fn test_total_amount_identity() {
        let r = compute(&low_down_payment_input()).unwrap();
        assert_eq!(r.total_amount, r.monthly_payment * dec!(360));
    }

    #[test]
    fn test_total_interest() {
        let r = compute(&LoanInput::default()).unwrap();
        assert_eq!(
            r.total_interest,
            r.monthly_principal_interest * dec!(360) - r.loan_amount
        );
        assert_close(r.total_interest, dec!(510_177), dec!(5), "lifetime interest");
    }

    #[test]
    fn test_idempotent() {
        let input = low_down_payment_input();
        let a = compute(&input).unwrap();
        let b = compute(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shorter_term_higher_payment_less_interest() {
        let mut input = LoanInput::default();
        let thirty = compute(&input).unwrap();
        input.loan_term_years = 15;
        let fifteen = compute(&input).unwrap();

        assert!(fifteen.monthly_principal_interest > thirty.monthly_principal_interest);
        assert!(fifteen.total_interest < thirty.total_interest);
    }

    #[test]
    fn test_zero_down_payment() {
        let mut input = LoanInput::default();
        input.down_payment = Decimal::ZERO;
        let r = compute(&input).unwrap();
        assert_eq!(r.loan_amount, dec!(500_000));
        // 500,000 * 0.5% / 12
        assert_close(r.monthly_pmi, dec!(208.33), TOL, "PMI on full loan");
    }

    // -- validation ---------------------------------------------------------

    #[test]
    fn test_validation_home_price_zero() {
        let mut input = LoanInput::default();
        input.home_price = Decimal::ZERO;
        assert_eq!(compute(&input).unwrap_err(), MortgageError::InvalidHomePrice);
    }

    #[test]
    fn test_validation_home_price_wins_over_other_errors() {
        let mut input = LoanInput::default();
        input.home_price = dec!(-1);
        input.annual_interest_rate_percent = Decimal::ZERO;
        assert_eq!(compute(&input).unwrap_err(), MortgageError::InvalidHomePrice);
    }

    #[test]
    fn test_validation_down_payment_equal_to_price() {
        let mut input = LoanInput::default();
        input.down_payment = input.home_price;
        assert_eq!(
            compute(&input).unwrap_err(),
            MortgageError::DownPaymentTooLarge
        );
    }

    #[test]
    fn test_validation_down_payment_wins_over_rate_and_term() {
        let mut input = LoanInput::default();
        input.down_payment = dec!(900_000);
        input.annual_interest_rate_percent = dec!(-3);
        input.loan_term_years = 0;
        assert_eq!(
            compute(&input).unwrap_err(),
            MortgageError::DownPaymentTooLarge
        );
    }

    #[test]
    fn test_validation_rate_not_positive() {
        for rate in [Decimal::ZERO, dec!(-0.25)] {
            let mut input = LoanInput::default();
            input.annual_interest_rate_percent = rate;
            assert_eq!(
                compute(&input).unwrap_err(),
                MortgageError::InvalidInterestRate
            );
        }
    }

    #[test]
    fn test_validation_term_bounds() {
        for term in [0, 51] {
            let mut input = LoanInput::default();
            input.loan_term_years = term;
            let err = compute(&input).unwrap_err();
            assert!(
                matches!(err, MortgageError::InvalidInput { ref field, .. } if field == "loan_term_years"),
                "term {} should be rejected, got {:?}",
                term,
                err
            );
        }
    }

    #[test]
    fn test_validation_negative_tax() {
        let mut input = LoanInput::default();
        input.annual_property_tax = dec!(-1);
        let err = compute(&input).unwrap_err();
        assert!(
            matches!(err, MortgageError::InvalidInput { ref field, .. } if field == "annual_property_tax")
        );
    }

    // -- analysis envelope ----------------------------------------------------

    #[test]
    fn test_analysis_derived_fields() {
        let out = analyze_mortgage(&low_down_payment_input()).unwrap();
        let a = &out.result;
        assert_eq!(a.down_payment_percent, dec!(10));
        assert_eq!(a.number_of_payments, 360);
        assert!(a.pmi_required);
        assert_eq!(a.amortization, compute(&low_down_payment_input()).unwrap());
        assert!(out.warnings.is_empty(), "unexpected warnings: {:?}", out.warnings);
    }

    #[test]
    fn test_analysis_percent_matches_preset_inverse() {
        let input = low_down_payment_input();
        let out = analyze_mortgage(&input).unwrap();
        assert_eq!(
            out.result.down_payment_percent,
            down_payment::down_payment_percent(input.home_price, input.down_payment).unwrap()
        );
    }

    #[test]
    fn test_analysis_warnings() {
        let mut input = LoanInput::default();
        input.loan_term_years = 25;
        input.annual_interest_rate_percent = dec!(24);
        let out = analyze_mortgage(&input).unwrap();

        assert_eq!(out.warnings.len(), 3);
        assert!(out.warnings.iter().any(|w| w.contains("standard terms")));
        assert!(out.warnings.iter().any(|w| w.contains("PMI waived")));
        assert!(out.warnings.iter().any(|w| w.contains("unusually high")));
    }

    #[test]
    fn test_analysis_missing_pmi_rate_warning() {
        let mut input = low_down_payment_input();
        input.pmi_annual_rate_percent = Decimal::ZERO;
        let out = analyze_mortgage(&input).unwrap();
        assert_eq!(out.result.amortization.monthly_pmi, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("no PMI rate")));
    }

    #[test]
    fn test_analysis_serializes_flat() {
        let out = analyze_mortgage(&LoanInput::default()).unwrap();
        let value = serde_json::to_value(&out).unwrap();
        let result = value.get("result").unwrap();
        assert!(result.get("monthly_payment").is_some());
        assert!(result.get("amortization").is_none());
        assert_eq!(
            value.get("methodology").and_then(|m| m.as_str()),
            Some("Fixed-Rate Mortgage Amortization (level-payment annuity)")
        );
    }

    #[test]
    fn test_zeroed_result() {
        let z = AmortizationResult::zeroed();
        assert_eq!(z.monthly_payment, Decimal::ZERO);
        assert_eq!(z.total_amount, Decimal::ZERO);
    }
}
