use chrono::{DateTime, Utc};

use crate::domain::CredentialRecord;

/// Where the cached credential stands when a run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialState {
    NoCredential,
    CredentialValid(CredentialRecord),
    CredentialExpired(CredentialRecord),
}

impl CredentialState {
    #[must_use]
    pub fn classify(cached: Option<CredentialRecord>, now: DateTime<Utc>) -> Self {
        match cached {
            None => CredentialState::NoCredential,
            Some(record) if record.is_valid_at(now) => CredentialState::CredentialValid(record),
            Some(record) => CredentialState::CredentialExpired(record),
        }
    }
}
