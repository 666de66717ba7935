//! Down payment presets: the "5% / 10% / 15% / 20%" buttons of a mortgage
//! form, and the inverse percentage shown next to a typed amount.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// Percentages offered as one-click down payment presets.
pub const DOWN_PAYMENT_PRESETS: [Percent; 4] = [dec!(5), dec!(10), dec!(15), dec!(20)];

/// Down payment for `percent` of `home_price`, rounded to whole currency
/// units. A non-positive home price yields zero.
pub fn down_payment_for_percent(home_price: Money, percent: Percent) -> MortgageResult<Money> {
    if home_price <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let amount = home_price
        .checked_mul(percent)
        .ok_or_else(|| MortgageError::Overflow {
            context: "down payment".into(),
        })?
        / dec!(100);
    Ok(amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Down payment as a percentage of the home price; zero when the price is
/// not positive.
pub fn down_payment_percent(home_price: Money, down_payment: Money) -> MortgageResult<Percent> {
    if home_price <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    down_payment
        .checked_div(home_price)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| MortgageError::Overflow {
            context: "down payment percent".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_percent() {
        assert_eq!(
            down_payment_for_percent(dec!(500_000), dec!(20)).unwrap(),
            dec!(100_000)
        );
    }

    #[test]
    fn test_rounds_to_whole_units() {
        // 333,333 * 5% = 16,666.65
        assert_eq!(
            down_payment_for_percent(dec!(333_333), dec!(5)).unwrap(),
            dec!(16_667)
        );
        // 10,001 * 5% = 500.05
        assert_eq!(
            down_payment_for_percent(dec!(10_001), dec!(5)).unwrap(),
            dec!(500)
        );
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 10,010 * 5% = 500.5
        assert_eq!(
            down_payment_for_percent(dec!(10_010), dec!(5)).unwrap(),
            dec!(501)
        );
    }

    #[test]
    fn test_missing_home_price() {
        assert_eq!(
            down_payment_for_percent(Decimal::ZERO, dec!(10)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            down_payment_percent(Decimal::ZERO, dec!(10)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_percent_inverse() {
        assert_eq!(
            down_payment_percent(dec!(400_000), dec!(60_000)).unwrap(),
            dec!(15)
        );
    }

    #[test]
    fn test_presets_stay_below_price() {
        for pct in DOWN_PAYMENT_PRESETS {
            let dp = down_payment_for_percent(dec!(250_000), pct).unwrap();
            assert!(dp < dec!(250_000));
        }
    }

    #[test]
    fn test_huge_price_reports_overflow() {
        let err = down_payment_for_percent(Decimal::MAX, dec!(200)).unwrap_err();
        assert!(
            matches!(err, MortgageError::Overflow { ref context } if context == "down payment"),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_huge_ratio_reports_overflow() {
        let err = down_payment_percent(dec!(0.0000000001), Decimal::MAX).unwrap_err();
        assert!(matches!(err, MortgageError::Overflow { .. }));
    }
}
