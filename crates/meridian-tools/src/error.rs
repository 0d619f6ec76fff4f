//! Error types for meridian-tools

use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Arguments were not the shape the tool accepts
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A parameter listed in the schema's `required` array is absent
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Tool execution failed
    #[error("{0}")]
    Execution(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_model_facing() {
        assert_eq!(
            Error::MissingParameter("a".to_string()).to_string(),
            "Missing required parameter: a"
        );
        assert_eq!(
            Error::InvalidArguments("Input must be an object".to_string()).to_string(),
            "invalid arguments: Input must be an object"
        );
        assert_eq!(
            Error::Execution("Division by zero".to_string()).to_string(),
            "Division by zero"
        );
    }
}
