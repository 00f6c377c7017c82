//! Configuration loading and resolution of per-run settings.
mod loader;
mod settings;
pub mod types;


pub use loader::load_config;
pub use settings::RunSettings;

#[cfg(test)]
pub(crate) use loader::load_config_file;
