use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When an IRI carries characters that cannot survive canonical serialization.
    #[error("{field} ('{value}') contains a reserved character")]
    ReservedCharacter {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
