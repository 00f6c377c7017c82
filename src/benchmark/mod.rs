//! Benchmark request/response protocol: payload rendering, the HTTP call,
//! and marker-scan extraction of the elapsed time.
mod client;
mod elapsed;
mod payload;


pub use client::{BenchmarkClient, BenchmarkResponse};
pub use elapsed::{DEFAULT_ELAPSED_MARKER, ElapsedParser, MalformedElapsedPolicy};
pub use payload::build_payload;
