//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;


pub use cli::BenchArgs;

pub(crate) use defaults::{
    DEFAULT_RESULTS_PATH, DEFAULT_TOKEN_PATH, DEFAULT_USER_AGENT, default_key_path,
};
