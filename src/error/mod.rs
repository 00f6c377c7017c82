mod app;
mod auth;
mod benchmark;
mod config;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use auth::{AuthError, ProviderError};
pub use benchmark::BenchmarkError;
pub use config::ConfigError;
pub use store::StoreError;
pub use validation::ValidationError;
