//! Value types shared by the credential and benchmark layers.
mod benchmark;
mod credential;

pub use benchmark::{BatchSize, BenchmarkHost, BenchmarkMethod, BenchmarkRequest};
pub use credential::{AccessToken, CredentialRecord};
