use thiserror::Error;

/// Top-level error type for the Kosei system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and convert into `KoseiError` at the boundary so
/// that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KoseiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Reference error: {0}")]
    Reference(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for KoseiError {
    fn from(err: toml::de::Error) -> Self {
        KoseiError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for KoseiError {
    fn from(err: toml::ser::Error) -> Self {
        KoseiError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for KoseiError {
    fn from(err: serde_json::Error) -> Self {
        KoseiError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Kosei operations.
pub type Result<T> = std::result::Result<T, KoseiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KoseiError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let kosei_err: KoseiError = io_err.into();
        assert!(matches!(kosei_err, KoseiError::Io(_)));
        assert!(kosei_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(KoseiError, &str)> = vec![
            (
                KoseiError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                KoseiError::Session("busy".to_string()),
                "Session error: busy",
            ),
            (
                KoseiError::Reference("no such file".to_string()),
                "Reference error: no such file",
            ),
            (
                KoseiError::Clipboard("open failed".to_string()),
                "Clipboard error: open failed",
            ),
            (
                KoseiError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(err.is_err());
        let kosei_err: KoseiError = err.unwrap_err().into();
        assert!(matches!(kosei_err, KoseiError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(err.is_err());
        let kosei_err: KoseiError = err.unwrap_err().into();
        assert!(matches!(kosei_err, KoseiError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }
}
