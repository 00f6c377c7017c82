use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer token. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Cached credential: the access token and the instant it stops being valid.
///
/// Records are replaced wholesale whenever a fresh token is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub access_token: AccessToken,
    pub expires_on: DateTime<Utc>,
}

impl CredentialRecord {
    #[must_use]
    pub const fn new(access_token: AccessToken, expires_on: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_on,
        }
    }

    /// A record is usable without re-authentication iff it expires after `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_on > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn validity_is_strict_on_expiry_instant() -> Result<(), String> {
        let now = Utc::now();
        let record = CredentialRecord::new(AccessToken::new("tok".to_owned()), now);
        if record.is_valid_at(now) {
            return Err("Record expiring now must not be valid".to_owned());
        }
        let later = CredentialRecord::new(
            AccessToken::new("tok".to_owned()),
            now + Duration::seconds(1),
        );
        if !later.is_valid_at(now) {
            return Err("Record expiring later must be valid".to_owned());
        }
        Ok(())
    }

    #[test]
    fn debug_redacts_token() -> Result<(), String> {
        let record = CredentialRecord::new(AccessToken::new("s3cr3t".to_owned()), Utc::now());
        let rendered = format!("{:?}", record);
        if rendered.contains("s3cr3t") {
            return Err(format!("Token leaked in debug output: {}", rendered));
        }
        Ok(())
    }

    #[test]
    fn serializes_with_camel_case_fields() -> Result<(), String> {
        let expires_on = DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
            .map_err(|err| format!("parse failed: {}", err))?
            .with_timezone(&Utc);
        let record = CredentialRecord::new(AccessToken::new("abc".to_owned()), expires_on);
        let json =
            serde_json::to_string(&record).map_err(|err| format!("serialize failed: {}", err))?;
        if json != r#"{"accessToken":"abc","expiresOn":"2026-10-19T12:00:00Z"}"# {
            return Err(format!("Unexpected JSON: {}", json));
        }
        Ok(())
    }
}
