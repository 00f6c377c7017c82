use clap::Parser;

use super::parsers::parse_batch_size;
use crate::benchmark::MalformedElapsedPolicy;
use crate::domain::{BatchSize, BenchmarkHost, BenchmarkMethod};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Benchmark a remote compute endpoint with a cached, per-user encrypted sign-in token.",
    override_usage = "acdc-bench <ac|tda|tda_async> <simple|walldesignersummary> <BATCH_SIZE> [OPTIONS]"
)]
pub struct BenchArgs {
    /// Host to benchmark
    #[arg(value_enum)]
    pub host: BenchmarkHost,

    /// Benchmark method to run
    #[arg(value_enum)]
    pub method: BenchmarkMethod,

    /// Number of items per benchmark batch (e.g. 2, 10, 100, 1000, 10000)
    #[arg(value_parser = parse_batch_size)]
    pub batch_size: BatchSize,

    /// Path to config file (TOML/JSON). Defaults to ./acdc-bench.toml or ./acdc-bench.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Benchmark endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Encrypted token cache file (default: token.dat)
    #[arg(long = "token-path")]
    pub token_path: Option<String>,

    /// Per-user key material file (default: ~/.acdc-bench/user.key)
    #[arg(long = "key-path")]
    pub key_path: Option<String>,

    /// CSV file results are appended to (default: results.csv)
    #[arg(long = "results")]
    pub results_path: Option<String>,

    /// What to do when the elapsed value is present but not a number
    #[arg(long = "malformed-elapsed", value_enum)]
    pub malformed_elapsed: Option<MalformedElapsedPolicy>,

    /// Enable verbose logging (sets log level to debug unless overridden by ACDC_BENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
