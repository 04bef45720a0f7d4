//! Errors raised while talking to the generation service.

use std::time::Duration;

use providertone_core::error::ToneError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The call could not be made or produced nothing usable.
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    /// The service answered with a failure status or the transport failed.
    #[error("Process error (status {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    #[error("Agent error: {0}")]
    Other(String),
}

impl AgentError {
    pub fn process_error_with_retry_after(
        status_code: u16,
        message: impl Into<String>,
        is_retryable: bool,
        retry_after: Duration,
    ) -> Self {
        Self::ProcessError {
            status_code: Some(status_code),
            message: message.into(),
            is_retryable,
            retry_after: Some(retry_after),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProcessError {
                is_retryable: true,
                ..
            }
        )
    }

    /// Server-suggested delay before retrying, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::ProcessError { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<AgentError> for ToneError {
    fn from(err: AgentError) -> Self {
        ToneError::generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_and_conversion() {
        let err = AgentError::process_error_with_retry_after(
            429,
            "rate limited",
            true,
            Duration::from_secs(3),
        );
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));

        let tone: ToneError = err.into();
        assert!(tone.is_generation_failure());
        assert!(tone.to_string().contains("rate limited"));

        assert!(!AgentError::ExecutionFailed("no key".into()).is_retryable());
    }
}
