use thiserror::Error;

use super::{AuthError, BenchmarkError, ConfigError, StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
    #[error("Benchmark error: {0}")]
    Benchmark(#[from] BenchmarkError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn auth<E>(error: E) -> Self
    where
        E: Into<AuthError>,
    {
        error.into().into()
    }

    pub fn benchmark<E>(error: E) -> Self
    where
        E: Into<BenchmarkError>,
    {
        error.into().into()
    }

    /// Returns true when the error means no usable access token could be obtained.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(self, AppError::Auth(AuthError::AuthenticationFailed { .. }))
    }
}
