//! Run-scoped pipeline state.

use std::path::PathBuf;

use quill_core::{InputFile, OutputFile};

/// State shared by the processors during one generation run.
///
/// `input_files` is filled by the scan before any processor runs.
/// `output_files` is replaced after the process phase and then updated in
/// place during post-processing.
#[derive(Debug, Clone, Default)]
pub struct GeneratorContext {
    /// Root the site is read from.
    pub input_directory: PathBuf,

    /// Root the site is written to.
    pub output_directory: PathBuf,

    /// Layout template, if the site has one.
    pub layout: Option<InputFile>,

    /// Every file found under `input_directory`.
    pub input_files: Vec<InputFile>,

    /// Files produced by the process phase.
    pub output_files: Vec<OutputFile>,
}

impl GeneratorContext {
    /// Create an empty context for the given directories.
    #[must_use]
    pub fn new(input_directory: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            input_directory: input_directory.into(),
            output_directory: output_directory.into(),
            ..Self::default()
        }
    }
}
