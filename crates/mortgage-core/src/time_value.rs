use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Compound growth factor (1 + rate)^nper.
pub fn compound_factor(rate: Rate, nper: u32) -> MortgageResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| MortgageError::Overflow {
            context: format!("compound factor (1 + {rate})^{nper}"),
        })
}

/// Level payment that fully amortises `principal` over `nper` periods at a
/// fixed periodic `rate`.
///
/// Evaluated as `principal * rate * (1+rate)^n / ((1+rate)^n - 1)`. A zero
/// rate, or one too small for the factor to move off 1.0 at 28 digits,
/// spreads the principal evenly across the periods.
pub fn level_payment(rate: Rate, nper: u32, principal: Money) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate <= dec!(-1) {
        return Err(MortgageError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let periods = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(principal / periods);
    }

    let factor = compound_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Ok(principal / periods);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| MortgageError::Overflow {
            context: "level payment".into(),
        })
}
