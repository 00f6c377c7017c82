use clap::ValueEnum;
use serde::Deserialize;

use crate::error::BenchmarkError;

/// Marker preceding the elapsed value in the response body, quotes included.
pub const DEFAULT_ELAPSED_MARKER: &str = "'elapsed':";

/// What to do when the text after the marker is not a number.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MalformedElapsedPolicy {
    /// Fail the run.
    #[default]
    Error,
    /// Record NaN like any other unreadable response.
    Nan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedParser {
    marker: String,
    policy: MalformedElapsedPolicy,
}

impl Default for ElapsedParser {
    fn default() -> Self {
        Self::new(DEFAULT_ELAPSED_MARKER.to_owned(), MalformedElapsedPolicy::Error)
    }
}

impl ElapsedParser {
    #[must_use]
    pub const fn new(marker: String, policy: MalformedElapsedPolicy) -> Self {
        Self { marker, policy }
    }

    /// Scans `body` for the marker and parses the text up to the next `,`
    /// (or `}` when no comma follows).
    ///
    /// Returns NaN when the body is absent or empty, the marker is missing,
    /// or no delimiter follows it.
    ///
    /// # Errors
    ///
    /// Returns [`BenchmarkError::MalformedElapsed`] when the extracted text is
    /// not a number and the policy is [`MalformedElapsedPolicy::Error`].
    pub fn extract_elapsed(&self, body: Option<&str>) -> Result<f64, BenchmarkError> {
        let Some(body) = body else {
            tracing::warn!("Response is absent");
            return Ok(f64::NAN);
        };
        if body.is_empty() {
            tracing::warn!("Response body is empty");
            return Ok(f64::NAN);
        }
        let Some((_, after_marker)) = body.split_once(self.marker.as_str()) else {
            tracing::warn!("Cannot find {} in response body", self.marker);
            return Ok(f64::NAN);
        };
        let Some(end) = after_marker.find(',').or_else(|| after_marker.find('}')) else {
            tracing::warn!("No delimiter after {} in response body", self.marker);
            return Ok(f64::NAN);
        };
        let text = after_marker.get(..end).unwrap_or_default().trim();

        match text.parse::<f64>() {
            Ok(value) => Ok(value),
            Err(err) => match self.policy {
                MalformedElapsedPolicy::Error => Err(BenchmarkError::MalformedElapsed {
                    text: text.to_owned(),
                    source: err,
                }),
                MalformedElapsedPolicy::Nan => {
                    tracing::warn!("Elapsed value '{}' is not a number", text);
                    Ok(f64::NAN)
                }
            },
        }
    }
}
