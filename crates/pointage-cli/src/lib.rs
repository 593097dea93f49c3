//! # Pointage CLI
//!
//! Operator tooling for the attendance system. This crate is the composition
//! root: it reads [`config::PointageConfig`], installs logging, builds the
//! production effect handlers and hands them to the controller store and the
//! attendance log.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod runtime;

pub use config::{default_config_path, default_storage_path, PointageConfig};
pub use runtime::PointageRuntime;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise `verbose` selects `debug` and the configured
/// level applies. Output goes to stderr so command output stays clean.
pub fn init_logging(verbose: bool, level: &str) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
