use std::str::FromStr;

use mortgage_core::mortgage::calculator::{self, LoanInput};
use mortgage_core::mortgage::form::RawLoanInput;
use mortgage_core::mortgage::{display, down_payment};
use mortgage_core::MortgageError;
use napi::{Result as NapiResult, Status};
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Calculator errors carry their stable code so the front-end can map them
/// to its own messages: `"DownPaymentTooLarge: Down payment must be ..."`.
/// Rejected inputs surface as `InvalidArg`, arithmetic failures as
/// `GenericFailure`.
fn mortgage_error(e: MortgageError) -> napi::Error {
    let status = if e.is_validation() {
        Status::InvalidArg
    } else {
        Status::GenericFailure
    };
    napi::Error::new(status, format!("{}: {}", e.code(), e))
}

fn parse_decimal(field: &str, value: &str) -> NapiResult<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| to_napi_error(format!("{field}: {e}")))
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_mortgage(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::compute(&input).map_err(mortgage_error)?;
    to_json(&output)
}

#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::analyze_mortgage(&input).map_err(mortgage_error)?;
    to_json(&output)
}

/// Compute straight from form field strings, as a page's inputs hold them.
#[napi]
pub fn compute_from_form(raw_json: String) -> NapiResult<String> {
    let raw: RawLoanInput = serde_json::from_str(&raw_json).map_err(to_napi_error)?;
    let output = calculator::compute(&raw.parse()).map_err(mortgage_error)?;
    to_json(&output)
}

#[napi]
pub fn default_loan_input() -> NapiResult<String> {
    to_json(&LoanInput::default())
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

#[napi]
pub fn down_payment_for_percent(home_price: String, percent: String) -> NapiResult<String> {
    let home_price = parse_decimal("home_price", &home_price)?;
    let percent = parse_decimal("percent", &percent)?;
    let amount =
        down_payment::down_payment_for_percent(home_price, percent).map_err(mortgage_error)?;
    Ok(amount.to_string())
}

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let amount = parse_decimal("amount", &amount)?;
    Ok(display::format_currency(amount))
}

/// Display strings for a result as returned by `computeMortgage`.
#[napi]
pub fn format_result(result_json: String) -> NapiResult<String> {
    let result: calculator::AmortizationResult =
        serde_json::from_str(&result_json).map_err(to_napi_error)?;
    let fields: serde_json::Map<String, serde_json::Value> = display::format_result(&result)
        .into_iter()
        .map(|(label, text)| (label.to_string(), serde_json::Value::String(text)))
        .collect();
    to_json(&fields)
}

/// All-zero result shown after the calculator is reset.
#[napi]
pub fn reset_result() -> NapiResult<String> {
    to_json(&calculator::AmortizationResult::zeroed())
}
