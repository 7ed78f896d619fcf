use thiserror::Error;

/// Main error type for jmedeval
#[derive(Error, Debug)]
pub enum EvalError {
    /// Task identifier not present in the routing table
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// Invalid input to a metric or parser (length mismatch, empty gold set, bad gold label)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset shape errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Generation backend errors
    #[error("Generation error: {0}")]
    Generation(String),
}

/// Convenient Result type using EvalError
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvalError::UnknownTask("medqa".to_string());
        assert!(err.to_string().contains("Unknown task"));
        assert!(err.to_string().contains("medqa"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let eval_err: EvalError = io_err.into();
        assert!(matches!(eval_err, EvalError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let eval_err: EvalError = json_err.into();
        assert!(matches!(eval_err, EvalError::Json(_)));
    }
}
