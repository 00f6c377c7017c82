use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use super::elapsed::ElapsedParser;
use super::payload::build_payload;
use crate::domain::{AccessToken, BenchmarkRequest};
use crate::error::{AppError, AppResult, BenchmarkError};

#[derive(Debug, Clone)]
pub struct BenchmarkResponse {
    pub status: StatusCode,
    pub body: Option<String>,
}

pub struct BenchmarkClient {
    http: reqwest::Client,
    endpoint: Url,
    parser: ElapsedParser,
}

impl BenchmarkClient {
    /// Builds a client for `endpoint`.
    ///
    /// The underlying HTTP client has no request timeout: benchmark runs may
    /// take arbitrarily long.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: &str, parser: ElapsedParser) -> AppResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|err| {
            AppError::benchmark(BenchmarkError::InvalidEndpoint {
                url: endpoint.to_owned(),
                source: err,
            })
        })?;
        let http = reqwest::Client::builder()
            .user_agent(crate::args::DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::benchmark(BenchmarkError::BuildClient { source: err }))?;
        Ok(Self {
            http,
            endpoint,
            parser,
        })
    }

    /// Posts `payload` as `text/plain` with the bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns [`BenchmarkError::Transport`] when the request cannot be sent.
    pub async fn send(
        &self,
        payload: String,
        token: &AccessToken,
    ) -> Result<BenchmarkResponse, BenchmarkError> {
        tracing::info!("Sending benchmark request to {}", self.endpoint);
        tracing::debug!("Payload: {}", payload);
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .header(CONTENT_TYPE, "text/plain")
            .body(payload)
            .send()
            .await
            .map_err(|err| BenchmarkError::Transport { source: err })?;
        let status = response.status();
        let body = match response.text().await {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!("Failed to read response body (status {}): {}", status, err);
                None
            }
        };
        tracing::debug!("Response status {}, body: {:?}", status, body);
        Ok(BenchmarkResponse { status, body })
    }

    /// Runs one benchmark request and returns the elapsed seconds, NaN when
    /// the call or the response could not yield a value.
    ///
    /// # Errors
    ///
    /// Returns an error only for a malformed number after the marker under the
    /// `error` policy.
    pub async fn run(&self, request: &BenchmarkRequest, token: &AccessToken) -> AppResult<f64> {
        let payload = build_payload(request.host, request.method, request.batch_size);
        let response = match self.send(payload, token).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("{}", err);
                return Ok(f64::NAN);
            }
        };
        if !response.status.is_success() {
            tracing::warn!("Benchmark endpoint answered {}", response.status);
        }
        let elapsed = self.parser.extract_elapsed(response.body.as_deref())?;
        Ok(elapsed)
    }
}
