use std::path::PathBuf;

use chrono::{Local, Utc};

use super::state::CredentialState;
use crate::domain::{AccessToken, CredentialRecord};
use crate::error::{AppError, AppResult, AuthError};
use crate::identity::{Account, IdentityProvider, SignInPrompt};
use crate::store::TokenStore;

/// Owns the lifecycle of the cached [`CredentialRecord`].
///
/// The identity session and the sign-in prompt are injected so the state
/// machine runs the same against fakes and the real provider.
pub struct CredentialManager {
    store: TokenStore,
    token_path: PathBuf,
    provider: Box<dyn IdentityProvider>,
    prompt: Box<dyn SignInPrompt>,
    scopes: Vec<String>,
}

impl CredentialManager {
    #[must_use]
    pub fn new(
        store: TokenStore,
        token_path: PathBuf,
        provider: Box<dyn IdentityProvider>,
        prompt: Box<dyn SignInPrompt>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            store,
            token_path,
            provider,
            prompt,
            scopes,
        }
    }

    /// Returns a usable access token, re-authenticating when needed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthenticationFailed`] when neither silent reuse nor
    /// interactive sign-in produced a token, or a store error when a fresh
    /// record cannot be cached.
    pub async fn get_access_token(&mut self) -> AppResult<AccessToken> {
        let cached = self.store.load(&self.token_path);
        match CredentialState::classify(cached, Utc::now()) {
            CredentialState::CredentialValid(record) => {
                tracing::info!(
                    "Using previous token (expires on: {})",
                    record.expires_on.with_timezone(&Local)
                );
                return Ok(record.access_token);
            }
            CredentialState::CredentialExpired(record) => {
                tracing::info!(
                    "Previous token expired on: {}",
                    record.expires_on.with_timezone(&Local)
                );
            }
            CredentialState::NoCredential => {
                tracing::debug!("No cached credential; signing in");
            }
        }

        let record = self.reauthenticate().await?;
        self.store.save(&record, &self.token_path)?;
        Ok(record.access_token)
    }

    async fn reauthenticate(&mut self) -> AppResult<CredentialRecord> {
        let accounts = self.provider.accounts();
        let first = accounts.first();

        match self.provider.acquire_token_silent(&self.scopes, first).await {
            Ok(response) => {
                tracing::debug!("Obtained token silently");
                return accepted(response.into_record());
            }
            Err(err) if err.is_interaction_required() => {
                tracing::debug!("{}", err);
            }
            Err(err) => {
                tracing::error!("Silent token reuse failed: {}", err);
                return Err(AppError::auth(AuthError::authentication_failed(
                    err.to_string(),
                )));
            }
        }

        let selected = self
            .prompt
            .prompt_for_account_selection(&accounts)
            .map_err(|err| AuthError::authentication_failed(err.to_string()))?;
        let account: Option<&Account> = selected
            .as_ref()
            .and_then(|id| accounts.iter().find(|account| &account.id == id));

        match self
            .provider
            .acquire_token_interactive(&self.scopes, account, self.prompt.as_ref())
            .await
        {
            Ok(response) => accepted(response.into_record()),
            Err(err) => {
                tracing::error!("Interactive sign-in failed: {}", err);
                Err(AppError::auth(AuthError::authentication_failed(
                    err.to_string(),
                )))
            }
        }
    }
}

fn accepted(record: CredentialRecord) -> AppResult<CredentialRecord> {
    if record.access_token.is_empty() {
        return Err(AppError::auth(AuthError::authentication_failed(
            "identity provider returned an empty access token",
        )));
    }
    Ok(record)
}
