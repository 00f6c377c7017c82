use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use super::claims::account_from_id_token;
use super::types::{Account, IdentityProvider, SignInPrompt, TokenResponse};
use crate::domain::AccessToken;
use crate::error::{AppError, AppResult, AuthError, ProviderError};

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
/// Always requested so the endpoint returns a refresh token and an id_token.
const RESERVED_SCOPES: [&str; 3] = ["offline_access", "openid", "profile"];
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Application registration the session signs in against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    pub client_id: String,
    pub authority: String,
    pub scopes: Vec<String>,
}

struct CachedAccount {
    account: Account,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeviceCodeReply {
    device_code: Option<String>,
    user_code: Option<String>,
    verification_uri: Option<String>,
    expires_in: Option<u64>,
    interval: Option<u64>,
    message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenReply {
    access_token: Option<String>,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
    id_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Session against the Microsoft identity platform v2.0 endpoints.
///
/// Known accounts and their refresh tokens live only as long as the session.
pub struct MicrosoftIdentitySession {
    http: reqwest::Client,
    client_id: String,
    authority: String,
    accounts: Vec<CachedAccount>,
    min_poll_interval: Duration,
    slow_down_step: Duration,
}

impl MicrosoftIdentitySession {
    /// Builds a session for the given application registration.
    ///
    /// # Errors
    ///
    /// Returns an error when the authority is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn new(settings: &IdentitySettings) -> AppResult<Self> {
        url::Url::parse(&settings.authority).map_err(|err| {
            AppError::auth(AuthError::InvalidAuthority {
                value: settings.authority.clone(),
                source: err,
            })
        })?;
        let http = reqwest::Client::builder()
            .user_agent(crate::args::DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::auth(AuthError::BuildClient { source: err }))?;
        Ok(Self {
            http,
            client_id: settings.client_id.clone(),
            authority: settings.authority.trim_end_matches('/').to_owned(),
            accounts: Vec::new(),
            min_poll_interval: MIN_POLL_INTERVAL,
            slow_down_step: SLOW_DOWN_STEP,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_poll_timing(mut self, min_interval: Duration, slow_down: Duration) -> Self {
        self.min_poll_interval = min_interval;
        self.slow_down_step = slow_down;
        self
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/oauth2/v2.0/{}", self.authority, name)
    }

    async fn post_form<T>(&self, endpoint: &str, form: &[(&str, &str)]) -> Result<T, ProviderError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http
            .post(endpoint)
            .form(form)
            .send()
            .await
            .map_err(|err| ProviderError::Transport { source: err })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::Transport { source: err })?;
        serde_json::from_str(&body).map_err(|err| ProviderError::InvalidResponse {
            reason: format!("HTTP {} with unreadable body: {}", status, err),
        })
    }

    /// Turns a successful token reply into a response and remembers the
    /// account for later silent reuse.
    fn accept(
        &mut self,
        reply: TokenReply,
        fallback: Option<&Account>,
    ) -> Result<TokenResponse, ProviderError> {
        let access_token = reply
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse {
                reason: "token reply without access_token".to_owned(),
            })?;
        let expires_on = expires_on_from(reply.expires_in)?;
        let account = match reply.id_token.as_deref() {
            Some(id_token) => Some(account_from_id_token(id_token)?),
            None => fallback.cloned(),
        };

        if let Some(account) = account.as_ref() {
            self.remember(account, reply.refresh_token);
        }

        Ok(TokenResponse {
            access_token: AccessToken::new(access_token),
            expires_on,
            account,
        })
    }

    fn remember(&mut self, account: &Account, refresh_token: Option<String>) {
        if let Some(cached) = self
            .accounts
            .iter_mut()
            .find(|cached| cached.account.id == account.id)
        {
            cached.account = account.clone();
            if refresh_token.is_some() {
                cached.refresh_token = refresh_token;
            }
            return;
        }
        self.accounts.push(CachedAccount {
            account: account.clone(),
            refresh_token,
        });
    }

    fn refresh_token_for(&self, account: &Account) -> Option<String> {
        self.accounts
            .iter()
            .find(|cached| cached.account.id == account.id)
            .and_then(|cached| cached.refresh_token.clone())
    }
}

#[async_trait]
impl IdentityProvider for MicrosoftIdentitySession {
    fn accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|cached| cached.account.clone())
            .collect()
    }

    async fn acquire_token_silent(
        &mut self,
        scopes: &[String],
        account: Option<&Account>,
    ) -> Result<TokenResponse, ProviderError> {
        let account = account.ok_or_else(|| ProviderError::InteractionRequired {
            reason: "no known account".to_owned(),
        })?;
        let refresh_token =
            self.refresh_token_for(account)
                .ok_or_else(|| ProviderError::InteractionRequired {
                    reason: format!("no refresh token for {}", account.username),
                })?;

        let scope = scope_param(scopes);
        let reply: TokenReply = self
            .post_form(
                &self.endpoint("token"),
                &[
                    ("client_id", self.client_id.as_str()),
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token.as_str()),
                    ("scope", scope.as_str()),
                ],
            )
            .await?;

        match reply.error.as_deref() {
            None => self.accept(reply, Some(account)),
            Some(
                code @ ("invalid_grant" | "interaction_required" | "login_required"
                | "consent_required"),
            ) => Err(ProviderError::InteractionRequired {
                reason: reply.error_description.unwrap_or_else(|| code.to_owned()),
            }),
            Some(code) => Err(ProviderError::Endpoint {
                code: code.to_owned(),
                description: reply.error_description.unwrap_or_default(),
            }),
        }
    }

    async fn acquire_token_interactive(
        &mut self,
        scopes: &[String],
        account: Option<&Account>,
        prompt: &dyn SignInPrompt,
    ) -> Result<TokenResponse, ProviderError> {
        let scope = scope_param(scopes);
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("scope", scope.as_str()),
        ];
        if let Some(account) = account {
            form.push(("login_hint", account.username.as_str()));
        }
        let device: DeviceCodeReply = self.post_form(&self.endpoint("devicecode"), &form).await?;
        if let Some(code) = device.error {
            return Err(ProviderError::Endpoint {
                code,
                description: device.error_description.unwrap_or_default(),
            });
        }
        let device_code = device
            .device_code
            .ok_or_else(|| ProviderError::InvalidResponse {
                reason: "device code reply without device_code".to_owned(),
            })?;

        let instructions = match (device.message, device.verification_uri, device.user_code) {
            (Some(message), _, _) => message,
            (None, Some(uri), Some(code)) => {
                format!("To sign in, open {} and enter the code {}.", uri, code)
            }
            _ => {
                return Err(ProviderError::InvalidResponse {
                    reason: "device code reply without instructions".to_owned(),
                });
            }
        };
        match account {
            Some(account) => prompt.show_sign_in_instructions(&format!(
                "{}\nSign in as {}.",
                instructions, account.username
            )),
            None => prompt.show_sign_in_instructions(&instructions),
        }

        let expires_in = Duration::from_secs(device.expires_in.unwrap_or(900));
        let deadline = Instant::now().checked_add(expires_in);
        let mut interval = device
            .interval
            .map_or(self.min_poll_interval, Duration::from_secs)
            .max(self.min_poll_interval);

        loop {
            tokio::time::sleep(interval).await;
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(ProviderError::Expired);
            }

            let reply: TokenReply = self
                .post_form(
                    &self.endpoint("token"),
                    &[
                        ("client_id", self.client_id.as_str()),
                        ("grant_type", DEVICE_CODE_GRANT),
                        ("device_code", device_code.as_str()),
                    ],
                )
                .await?;

            match reply.error.as_deref() {
                None => {
                    let response = self.accept(reply, account)?;
                    if let (Some(wanted), Some(got)) = (account, response.account.as_ref()) {
                        if wanted.id != got.id {
                            tracing::warn!(
                                "Signed in as {} instead of the selected {}",
                                got.username,
                                wanted.username
                            );
                        }
                    }
                    return Ok(response);
                }
                Some("authorization_pending") => {}
                Some("slow_down") => {
                    interval = interval.saturating_add(self.slow_down_step);
                    tracing::debug!("Identity provider asked to slow down polling");
                }
                Some("authorization_declined") => return Err(ProviderError::Declined),
                Some("expired_token") => return Err(ProviderError::Expired),
                Some(code) => {
                    return Err(ProviderError::Endpoint {
                        code: code.to_owned(),
                        description: reply.error_description.unwrap_or_default(),
                    });
                }
            }
        }
    }
}

fn scope_param(scopes: &[String]) -> String {
    let mut all: Vec<&str> = scopes.iter().map(String::as_str).collect();
    for reserved in RESERVED_SCOPES {
        if !all.contains(&reserved) {
            all.push(reserved);
        }
    }
    all.join(" ")
}

fn expires_on_from(expires_in: Option<i64>) -> Result<DateTime<Utc>, ProviderError> {
    let seconds = expires_in.ok_or_else(|| ProviderError::InvalidResponse {
        reason: "token reply without expires_in".to_owned(),
    })?;
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .ok_or_else(|| ProviderError::InvalidResponse {
            reason: format!("expires_in out of range: {}", seconds),
        })
}
