//! Core library for the `acdc-bench` CLI.
//!
//! A run reuses or refreshes a sign-in token (cached on disk, encrypted per
//! user), posts one benchmark request to the remote compute endpoint, and
//! extracts the elapsed time from the loosely structured reply. The binary
//! appends each result to a CSV log.
pub mod app;
pub mod args;
pub mod auth;
pub mod benchmark;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod identity;
pub mod logger;
pub mod results;
pub mod store;
