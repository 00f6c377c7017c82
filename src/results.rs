//! Append-only CSV log of benchmark results, one line per run.
use std::path::Path;

use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;

use crate::domain::BenchmarkRequest;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy)]
pub struct ResultLine {
    pub timestamp: DateTime<Local>,
    pub request: BenchmarkRequest,
    pub elapsed: f64,
}

impl std::fmt::Display for ResultLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.request.host.as_str(),
            self.request.method.as_str(),
            self.request.batch_size,
            self.elapsed
        )
    }
}

/// Appends `line` to the log at `path`, creating the file if needed.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or written.
pub async fn append_result(path: &Path, line: &ResultLine) -> Result<(), std::io::Error> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    let text = format!("{}\n", line);
    file.write_all(text.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
