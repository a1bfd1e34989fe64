//! Recognizer and judge error types.
//!
//! Recognizer errors are defined in `quizmatch-core` so the judge can turn
//! any backend failure into a `ClassifierUnavailable` without string
//! matching.

use thiserror::Error;

/// Errors that can occur when running a named-entity recognizer.
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// The recognizer backend could not be reached or has no model loaded.
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),

    /// The request timed out.
    #[error("recognizer timed out after {0}s")]
    Timeout(u64),

    /// The backend rejected the configured API key.
    #[error("recognizer authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model is not known to the backend.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The backend returned an error response.
    #[error("recognizer API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The backend answered with something that is not an entity list.
    #[error("invalid recognizer response: {0}")]
    InvalidResponse(String),
}

impl RecognizerError {
    /// Returns `true` if retrying the same backend cannot succeed without
    /// a configuration change.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            RecognizerError::AuthenticationFailed(_) | RecognizerError::ModelNotFound(_)
        )
    }
}

/// Errors returned by the answer judge.
///
/// A judge never fails because of its input; any string yields a decision.
/// The only failure is a classifier that cannot answer, which must stay
/// distinct from an incorrect answer.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("named-entity classifier unavailable")]
    ClassifierUnavailable(#[source] RecognizerError),
}

impl From<RecognizerError> for JudgeError {
    fn from(err: RecognizerError) -> Self {
        JudgeError::ClassifierUnavailable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_errors() {
        assert!(RecognizerError::ModelNotFound("xx".into()).is_permanent());
        assert!(RecognizerError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(!RecognizerError::Timeout(30).is_permanent());
        assert!(!RecognizerError::Unavailable("down".into()).is_permanent());
    }

    #[test]
    fn judge_error_keeps_source() {
        let err: JudgeError = RecognizerError::Timeout(5).into();
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("recognizer timed out after 5s"));
        assert!(format!("{err}").contains("classifier unavailable"));
    }
}
