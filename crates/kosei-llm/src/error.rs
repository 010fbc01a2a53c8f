use thiserror::Error;

/// Errors from the chat-completion backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("credential not configured: set the {0} environment variable")]
    MissingCredential(String),

    #[error("request failed with HTTP status {status}")]
    Http { status: u16 },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response envelope: {0}")]
    Envelope(String),

    #[error("response contained no choices")]
    EmptyChoices,

    #[error("failed to encode request body: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_names_the_variable() {
        let err = LlmError::MissingCredential("OPENROUTER_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "credential not configured: set the OPENROUTER_API_KEY environment variable"
        );
    }

    #[test]
    fn test_http_error_includes_status() {
        let err = LlmError::Http { status: 500 };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_timeout_includes_seconds() {
        let err = LlmError::Timeout(30);
        assert_eq!(err.to_string(), "request timed out after 30s");
    }
}
