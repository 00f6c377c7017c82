use clap::ValueEnum;
use std::num::NonZeroU32;

use crate::error::ValidationError;

/// Remote compute host the benchmark runs against.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BenchmarkHost {
    #[value(name = "ac")]
    PrimaryCompute,
    #[value(name = "tda")]
    HostedCompute,
    #[value(name = "tda_async")]
    HostedComputeAsync,
}

impl BenchmarkHost {
    /// Canonical identifier, as written to the result log.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BenchmarkHost::PrimaryCompute => "ArupCompute",
            BenchmarkHost::HostedCompute => "TDA_Hosted_DC",
            BenchmarkHost::HostedComputeAsync => "TDA_Hosted_DC_Async",
        }
    }

    /// Host name as the endpoint expects it: underscores become spaces.
    #[must_use]
    pub fn wire_name(self) -> String {
        self.as_str().replace('_', " ")
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BenchmarkMethod {
    #[value(name = "simple")]
    Simple,
    #[value(name = "walldesignersummary")]
    WallDesignerSummary,
}

impl BenchmarkMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BenchmarkMethod::Simple => "Simple",
            BenchmarkMethod::WallDesignerSummary => "WallDesignerSummary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(NonZeroU32);

impl BatchSize {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for BatchSize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(BatchSize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for BatchSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        BatchSize::try_from(value)
    }
}

impl std::fmt::Display for BatchSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One benchmark invocation; built once per run and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkRequest {
    pub host: BenchmarkHost,
    pub method: BenchmarkMethod,
    pub batch_size: BatchSize,
}
