use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, CredentialRecord};
use crate::error::{AppResult, ProviderError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
}

/// Token handed back by a provider after silent or interactive acquisition.
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub access_token: AccessToken,
    pub expires_on: DateTime<Utc>,
    pub account: Option<Account>,
}

impl TokenResponse {
    #[must_use]
    pub fn into_record(self) -> CredentialRecord {
        CredentialRecord::new(self.access_token, self.expires_on)
    }
}

/// A session with the identity provider.
///
/// Implementations keep whatever state silent reuse needs (known accounts,
/// refresh tokens) for the lifetime of the session.
#[async_trait]
pub trait IdentityProvider: Send {
    /// Accounts the session has signed in before.
    fn accounts(&self) -> Vec<Account>;

    /// Obtains a token without user interaction.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InteractionRequired`] when the provider needs
    /// the user, or another [`ProviderError`] on endpoint or transport failure.
    async fn acquire_token_silent(
        &mut self,
        scopes: &[String],
        account: Option<&Account>,
    ) -> Result<TokenResponse, ProviderError>;

    /// Obtains a token by asking the user to sign in.
    ///
    /// # Errors
    ///
    /// Returns an error when the user declines, the sign-in expires, or the
    /// provider rejects the request.
    async fn acquire_token_interactive(
        &mut self,
        scopes: &[String],
        account: Option<&Account>,
        prompt: &dyn SignInPrompt,
    ) -> Result<TokenResponse, ProviderError>;
}

/// User-facing side of interactive sign-in.
pub trait SignInPrompt: Send + Sync {
    /// Lets the user pick one of the known accounts; `None` means sign in
    /// with a different account.
    ///
    /// # Errors
    ///
    /// Returns an error when the prompt cannot interact with the user.
    fn prompt_for_account_selection(&self, accounts: &[Account]) -> AppResult<Option<AccountId>>;

    /// Shows the provider's sign-in instructions to the user.
    fn show_sign_in_instructions(&self, message: &str);
}
