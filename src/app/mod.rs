//! One benchmark run: credential, request, result line.
use chrono::Local;

use crate::auth::CredentialManager;
use crate::benchmark::BenchmarkClient;
use crate::config::RunSettings;
use crate::error::AppResult;
use crate::identity::{ConsolePrompt, MicrosoftIdentitySession};
use crate::results::{ResultLine, append_result};
use crate::store::{FileKeyProvider, TokenStore};

/// Runs the benchmark described by `settings` and returns the elapsed
/// seconds (NaN when the response could not be read).
///
/// # Errors
///
/// Returns an error when no usable token can be obtained, the result log
/// cannot be written, or the elapsed value is malformed under the `error`
/// policy.
pub async fn run_benchmark(settings: &RunSettings) -> AppResult<f64> {
    let store = TokenStore::new(Box::new(FileKeyProvider::new(settings.key_path.clone())));
    let session = MicrosoftIdentitySession::new(&settings.identity)?;
    let mut credentials = CredentialManager::new(
        store,
        settings.token_path.clone(),
        Box::new(session),
        Box::new(ConsolePrompt),
        settings.identity.scopes.clone(),
    );
    let client = BenchmarkClient::new(&settings.endpoint, settings.elapsed_parser())?;

    let token = match credentials.get_access_token().await {
        Ok(token) => token,
        Err(err) => {
            if err.is_authentication_failure() {
                tracing::error!("No valid token");
            }
            return Err(err);
        }
    };

    let timestamp = Local::now();
    let elapsed = client.run(&settings.request, &token).await?;
    let line = ResultLine {
        timestamp,
        request: settings.request,
        elapsed,
    };
    append_result(&settings.results_path, &line).await?;
    tracing::debug!(
        "Appended result to {}: {}",
        settings.results_path.display(),
        line
    );
    Ok(elapsed)
}
