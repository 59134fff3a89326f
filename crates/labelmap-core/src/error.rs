use thiserror::Error;

/// Canonical error type for lookup-table operations.
///
/// Absence of a label is not an error: `find` returns `Option` and
/// `erase` returns a presence flag. The variants here cover the only
/// fallible surfaces: configuration validation and profiler export.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable description of the rejected setting.
        message: String,
    },

    /// I/O error occurred while writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of export rows failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Creates an `InvalidConfig` variant.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Convenient result alias for lookup-table operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_formats_message() {
        let err = CoreError::invalid_config("shard_count must be non-zero");
        assert_eq!(
            err.to_string(),
            "invalid configuration: shard_count must be non-zero"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = CoreError::from(io);
        assert!(matches!(err, CoreError::Io(_)));
    }
}
