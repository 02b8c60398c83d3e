//! CLI command implementations.

pub mod generate;
