//! Credential lifecycle: reuse the cached token while it is valid, otherwise
//! re-authenticate (silent first, interactive second) and cache the result.
mod manager;
mod state;


pub use manager::CredentialManager;
pub use state::CredentialState;
