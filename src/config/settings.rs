use std::path::PathBuf;

use crate::args::{BenchArgs, DEFAULT_RESULTS_PATH, DEFAULT_TOKEN_PATH, default_key_path};
use crate::benchmark::{DEFAULT_ELAPSED_MARKER, ElapsedParser, MalformedElapsedPolicy};
use crate::domain::BenchmarkRequest;
use crate::error::{AppError, AppResult, ConfigError};
use crate::identity::IdentitySettings;

use super::types::ConfigFile;

pub(crate) const DEFAULT_ENDPOINT: &str =
    "https://tdal-dev-function-app-ds15.azurewebsites.net/api/test/run_dc_benchmark";
pub(crate) const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/arup.onmicrosoft.com";
pub(crate) const DEFAULT_CLIENT_ID: &str = "e6a6969e-064c-4125-8629-85f37a31cec7";
pub(crate) const DEFAULT_SCOPES: [&str; 2] =
    ["user.read", "api://tda-app-dev-api/user_impersonation"];

/// Everything one run needs, after CLI flags, config file and defaults are
/// merged (in that order of precedence).
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub request: BenchmarkRequest,
    pub endpoint: String,
    pub token_path: PathBuf,
    pub key_path: PathBuf,
    pub results_path: PathBuf,
    pub elapsed_marker: String,
    pub malformed_elapsed: MalformedElapsedPolicy,
    pub identity: IdentitySettings,
}

impl RunSettings {
    /// Merges CLI arguments over the optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured value is empty.
    pub fn resolve(args: &BenchArgs, config: Option<ConfigFile>) -> AppResult<Self> {
        let config = config.unwrap_or_default();
        let identity = config.identity.unwrap_or_default();

        let endpoint = pick(args.endpoint.clone(), config.endpoint, DEFAULT_ENDPOINT);
        let token_path = pick(args.token_path.clone(), config.token_path, DEFAULT_TOKEN_PATH);
        let results_path = pick(
            args.results_path.clone(),
            config.results_path,
            DEFAULT_RESULTS_PATH,
        );
        let key_path = args
            .key_path
            .clone()
            .or(config.key_path)
            .unwrap_or_else(default_key_path);
        let elapsed_marker = config
            .elapsed_marker
            .unwrap_or_else(|| DEFAULT_ELAPSED_MARKER.to_owned());
        let malformed_elapsed = args
            .malformed_elapsed
            .or(config.malformed_elapsed)
            .unwrap_or_default();
        let scopes = identity.scopes.unwrap_or_else(|| {
            DEFAULT_SCOPES
                .iter()
                .map(|scope| (*scope).to_owned())
                .collect()
        });
        let identity = IdentitySettings {
            client_id: identity
                .client_id
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_owned()),
            authority: identity
                .authority
                .unwrap_or_else(|| DEFAULT_AUTHORITY.to_owned()),
            scopes,
        };

        non_empty("endpoint", &endpoint)?;
        non_empty("token_path", &token_path)?;
        non_empty("key_path", &key_path)?;
        non_empty("results_path", &results_path)?;
        non_empty("elapsed_marker", &elapsed_marker)?;
        non_empty("identity.client_id", &identity.client_id)?;
        non_empty("identity.authority", &identity.authority)?;

        Ok(Self {
            request: BenchmarkRequest {
                host: args.host,
                method: args.method,
                batch_size: args.batch_size,
            },
            endpoint,
            token_path: PathBuf::from(token_path),
            key_path: PathBuf::from(key_path),
            results_path: PathBuf::from(results_path),
            elapsed_marker,
            malformed_elapsed,
            identity,
        })
    }

    #[must_use]
    pub fn elapsed_parser(&self) -> ElapsedParser {
        ElapsedParser::new(self.elapsed_marker.clone(), self.malformed_elapsed)
    }
}

fn pick(cli: Option<String>, config: Option<String>, default: &str) -> String {
    cli.or(config).unwrap_or_else(|| default.to_owned())
}

fn non_empty(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::config(ConfigError::EmptyValue { field }));
    }
    Ok(())
}
