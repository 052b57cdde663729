//! Domain-specific error types for reframe-core

use thiserror::Error;

/// Main error type for the reframe pipeline.
///
/// Every failure crosses the component boundary as one of these variants;
/// nothing in the pipeline panics or throws unclassified errors.
#[derive(Error, Debug)]
pub enum ReframeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Policy rejection, not a technical failure. Retrying without a tier
    /// upgrade or a window reset will not change the outcome.
    #[error("Weekly reframe limit reached ({used}/{limit} this window)")]
    QuotaExhausted { used: u32, limit: u32 },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Rate limited by completion endpoint: {message}")]
    RateLimit { message: String },

    #[error("Completion endpoint error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Completion endpoint returned no choices")]
    EmptyResponse,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl ReframeError {
    /// True for failures where re-submitting the same input may succeed.
    /// The caller uses this to decide whether to offer a retry affordance
    /// with the original input preserved.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReframeError::Network { .. }
                | ReframeError::RateLimit { .. }
                | ReframeError::Upstream { .. }
                | ReframeError::EmptyResponse
                | ReframeError::Storage { .. }
        )
    }

    /// End-user copy for this failure. Operator detail stays in the
    /// `Display` impl and the logs; configuration problems in particular
    /// surface as a generic service message.
    pub fn user_message(&self) -> String {
        match self {
            ReframeError::Config { .. } => {
                "AI service configuration error. Please contact support.".to_string()
            }
            ReframeError::Validation { message } => message.clone(),
            ReframeError::QuotaExhausted { .. } => {
                "You've used all your free reframes this week. Upgrade to premium for unlimited reframes."
                    .to_string()
            }
            ReframeError::Network { .. } => {
                "Network error. Please check your connection and try again.".to_string()
            }
            ReframeError::RateLimit { .. } => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            ReframeError::Storage { .. } => {
                "Failed to save your reframe. Please try again.".to_string()
            }
            ReframeError::Upstream { .. } | ReframeError::EmptyResponse => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ReframeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReframeError::Network {
                message: format!("request timed out: {}", err),
            }
        } else {
            ReframeError::Network {
                message: format!("HTTP request failed: {}", err),
            }
        }
    }
}

/// Result type alias for reframe operations
pub type Result<T> = std::result::Result<T, ReframeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_rejection_is_not_retryable() {
        let err = ReframeError::QuotaExhausted { used: 3, limit: 3 };
        assert!(!err.is_retryable());
    }

    #[test]
    fn transient_failures_are_retryable() {
        assert!(
            ReframeError::RateLimit {
                message: "slow down".into()
            }
            .is_retryable()
        );
        assert!(ReframeError::EmptyResponse.is_retryable());
    }

    #[test]
    fn config_errors_hide_detail_from_users() {
        let err = ReframeError::Config {
            message: "OPENAI_API_KEY is not set".into(),
        };
        assert!(!err.user_message().contains("OPENAI_API_KEY"));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
