use thiserror::Error;

/// Failures reported by an identity provider session.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("User interaction is required: {reason}")]
    InteractionRequired { reason: String },
    #[error("Sign-in was declined by the user.")]
    Declined,
    #[error("Sign-in code expired before it was used.")]
    Expired,
    #[error("Identity endpoint returned '{code}': {description}")]
    Endpoint { code: String, description: String },
    #[error("Identity request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid identity response: {reason}")]
    InvalidResponse { reason: String },
}

impl ProviderError {
    #[must_use]
    pub const fn is_interaction_required(&self) -> bool {
        matches!(self, ProviderError::InteractionRequired { .. })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No usable token: {reason}")]
    AuthenticationFailed { reason: String },
    #[error("Invalid identity authority '{value}': {source}")]
    InvalidAuthority {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build identity HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl AuthError {
    pub fn authentication_failed(reason: impl Into<String>) -> Self {
        AuthError::AuthenticationFailed {
            reason: reason.into(),
        }
    }
}
