use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MortgageError {
    #[error("Please enter a valid home price")]
    InvalidHomePrice,

    #[error("Down payment must be less than home price")]
    DownPaymentTooLarge,

    #[error("Please enter a valid interest rate")]
    InvalidInterestRate,

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    /// Stable identifier for the error kind, independent of the message text.
    pub fn code(&self) -> &'static str {
        match self {
            MortgageError::InvalidHomePrice => "InvalidHomePrice",
            MortgageError::DownPaymentTooLarge => "DownPaymentTooLarge",
            MortgageError::InvalidInterestRate => "InvalidInterestRate",
            MortgageError::InvalidInput { .. } => "InvalidInput",
            MortgageError::Overflow { .. } => "Overflow",
            MortgageError::SerializationError(_) => "SerializationError",
        }
    }

    /// True for errors the user can fix by changing the loan parameters.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MortgageError::InvalidHomePrice
                | MortgageError::DownPaymentTooLarge
                | MortgageError::InvalidInterestRate
                | MortgageError::InvalidInput { .. }
        )
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            MortgageError::DownPaymentTooLarge.to_string(),
            "Down payment must be less than home price"
        );
        let e = MortgageError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be between 1 and 50 years".into(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid input: loan_term_years: Loan term must be between 1 and 50 years"
        );
    }

    #[test]
    fn test_codes_and_validation_flag() {
        assert_eq!(MortgageError::InvalidHomePrice.code(), "InvalidHomePrice");
        assert!(MortgageError::InvalidInterestRate.is_validation());
        assert!(!MortgageError::Overflow {
            context: "annuity factor".into()
        }
        .is_validation());
    }
}
