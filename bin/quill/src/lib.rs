//! Quill CLI Library
//!
//! Command implementations for the Quill static site generator, exposed as a
//! library so they can be driven from tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (generate)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use quill::cmd;
//!
//! // Generate ./site into ./site/www
//! cmd::generate::run(Path::new("site"), None, false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use quill_core::Config;
pub use quill_generator::{GenerateStats, Generator};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
