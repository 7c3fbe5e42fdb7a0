//! Error types for the calculator and its loaders.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Errors raised by the calculator, the request gate and the parameter loader.
///
/// Reference index failures are deliberately absent: they are absorbed by
/// [`crate::index`] and never reach the calculator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalcError {
    /// A precondition on the calculation input was violated (e.g. age of zero).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A parameter set was loaded but failed validation.
    #[error("invalid parameters: {message}")]
    Parameters { message: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl CalcError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CalcError::InvalidInput { message: message.into() }
    }

    pub(crate) fn parameters(message: impl Into<String>) -> Self {
        CalcError::Parameters { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display_includes_message() {
        let err = CalcError::invalid("age must be greater than zero");
        assert_eq!(format!("{err}"), "invalid input: age must be greater than zero");
    }

    #[test]
    fn parameters_display_includes_message() {
        let err = CalcError::parameters("divisor must be positive");
        assert!(format!("{err}").contains("divisor must be positive"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CalcError>();
    }
}
