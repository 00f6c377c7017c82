use base64::Engine as _;
use serde::Deserialize;

use super::types::{Account, AccountId};
use crate::error::ProviderError;

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    oid: Option<String>,
    tid: Option<String>,
    sub: Option<String>,
    preferred_username: Option<String>,
    name: Option<String>,
}

/// Reads the account out of an `id_token` without verifying its signature.
/// The token came straight from the token endpoint over TLS.
pub(super) fn account_from_id_token(id_token: &str) -> Result<Account, ProviderError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| ProviderError::InvalidResponse {
            reason: "id_token is not a JWT".to_owned(),
        })?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| ProviderError::InvalidResponse {
            reason: format!("id_token payload is not base64url: {}", err),
        })?;
    let claims: IdTokenClaims =
        serde_json::from_slice(&bytes).map_err(|err| ProviderError::InvalidResponse {
            reason: format!("id_token payload is not JSON: {}", err),
        })?;

    let id = match (claims.oid.as_deref(), claims.tid.as_deref()) {
        (Some(oid), Some(tid)) => format!("{}.{}", oid, tid),
        (Some(oid), None) => oid.to_owned(),
        (None, _) => claims.sub.clone().ok_or_else(|| ProviderError::InvalidResponse {
            reason: "id_token carries neither oid nor sub".to_owned(),
        })?,
    };
    let username = claims
        .preferred_username
        .or(claims.name)
        .unwrap_or_else(|| id.clone());

    Ok(Account {
        id: AccountId::new(id),
        username,
    })
}
