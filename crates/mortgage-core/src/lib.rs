pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
