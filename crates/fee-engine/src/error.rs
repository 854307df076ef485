//! Fee engine error types.

use thiserror::Error;

/// Errors that can occur while configuring or running a fee computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeeError {
    /// Computation requested before a unit price was entered.
    #[error("Unit price is required before fees can be computed")]
    MissingPrice,

    /// Rate configuration failed validation.
    #[error("Invalid rate configuration: {0}")]
    InvalidConfig(String),

    /// Order input failed validation.
    #[error("Invalid order input: {0}")]
    InvalidInput(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in fee calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FeeError {
    /// Whether this error means the caller should keep waiting for input
    /// rather than report a failure.
    pub fn is_awaiting_input(&self) -> bool {
        matches!(self, FeeError::MissingPrice)
    }
}

impl From<serde_json::Error> for FeeError {
    fn from(e: serde_json::Error) -> Self {
        FeeError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_price_is_awaiting_input() {
        assert!(FeeError::MissingPrice.is_awaiting_input());
        assert!(!FeeError::Overflow.is_awaiting_input());
        assert!(!FeeError::InvalidConfig("x".into()).is_awaiting_input());
    }

    #[test]
    fn test_error_messages() {
        let err = FeeError::InvalidInput("quantity must be at least 1, got 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid order input: quantity must be at least 1, got 0"
        );
    }
}
