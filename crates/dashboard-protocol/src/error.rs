//! Wire Format Error Types

use thiserror::Error;

/// Errors that can occur while turning raw dashboard input into a [`Reading`](crate::Reading)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No input was supplied at all
    #[error("The input shall not be null.")]
    InputMissing,

    /// Wrong number of `|`-delimited fields
    #[error("Unexpected number of parameters in the input: expected {expected}, got {actual}")]
    FieldCountMismatch { expected: usize, actual: usize },

    /// A numeric field is not a valid number in its expected format or width
    #[error("Invalid numeric value {value:?} for field {field}")]
    NumericParse { field: &'static str, value: String },

    /// Gear token does not match any known gear
    #[error("No such gear: {0:?}")]
    UnknownGear(String),
}
