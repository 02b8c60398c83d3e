//! The processor contract.
//!
//! A run drives every registered processor through three phases, each one
//! finished for all processors before the next begins:
//!
//! 1. `pre_process` sees every input file and may record run state, such as
//!    the layout.
//! 2. `process` may claim an input file by returning an output file.
//! 3. `post_process` may rewrite any output file's content.

use std::path::PathBuf;

use quill_core::{InputFile, OutputFile};
use thiserror::Error;

use crate::{context::GeneratorContext, fs::FsError};

/// Processor errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// File system error.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Rendering failed. `path` is the page's source file.
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

/// Result type for processor operations.
pub type Result<T> = std::result::Result<T, ProcessError>;

/// A pipeline stage. All phases default to no-ops.
pub trait Processor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect an input file before any processing begins.
    fn pre_process(&self, _file: &InputFile, _context: &mut GeneratorContext) -> Result<()> {
        Ok(())
    }

    /// Claim an input file.
    fn process(&self, _file: &InputFile, _context: &GeneratorContext) -> Result<Option<OutputFile>> {
        Ok(None)
    }

    /// Rewrite an output file once the full output set is known.
    fn post_process(&self, _file: &mut OutputFile, _context: &GeneratorContext) -> Result<()> {
        Ok(())
    }
}
