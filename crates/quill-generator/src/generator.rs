//! Generation orchestration.
//!
//! A run moves through fixed phases:
//! clear output → create temp folder → scan → pre-process → process →
//! post-process → write → delete temp folder.
//!
//! The temp folder is deleted whether or not the run succeeds, unless
//! [`Generator::keep_temp_on_error`] asks to keep it after a failure.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    context::GeneratorContext,
    fs::{FileSystem, FsError},
    processor::{ProcessError, Processor},
};

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// File system error.
    #[error("file system error: {0}")]
    Fs(#[from] FsError),

    /// Processor error.
    #[error("processor error: {0}")]
    Process(#[from] ProcessError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// `generate` was called before any processor was added.
    #[error("no processors registered")]
    NoProcessors,
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Generation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Number of files found in the input directory.
    pub inputs: usize,

    /// Number of rendered pages written.
    pub pages: usize,

    /// Number of files copied verbatim.
    pub copied: usize,

    /// Run duration in milliseconds.
    pub duration_ms: u64,
}

/// Runs registered processors over a site.
pub struct Generator {
    fs: Arc<dyn FileSystem>,
    context: GeneratorContext,
    processors: Vec<Box<dyn Processor>>,
    keep_temp_on_error: bool,
    temp_folder: Option<PathBuf>,
}

impl Generator {
    /// Create a generator.
    ///
    /// Fails if either directory in `context` is blank.
    pub fn new(fs: Arc<dyn FileSystem>, context: GeneratorContext) -> Result<Self> {
        if is_blank(&context.input_directory) {
            return Err(GenerateError::Config(
                "input directory cannot be empty".to_string(),
            ));
        }
        if is_blank(&context.output_directory) {
            return Err(GenerateError::Config(
                "output directory cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            fs,
            context,
            processors: Vec::new(),
            keep_temp_on_error: false,
            temp_folder: None,
        })
    }

    /// Register a processor. Processors run in registration order in every
    /// phase.
    pub fn add_processor(&mut self, processor: impl Processor + 'static) -> &mut Self {
        debug!(processor = processor.name(), "registered processor");
        self.processors.push(Box::new(processor));
        self
    }

    /// Leave the temp folder on disk when a run fails.
    pub fn keep_temp_on_error(&mut self, keep: bool) -> &mut Self {
        self.keep_temp_on_error = keep;
        self
    }

    /// State of the most recent run.
    pub fn context(&self) -> &GeneratorContext {
        &self.context
    }

    /// Execute a full generation run.
    pub fn generate(&mut self) -> Result<GenerateStats> {
        if self.processors.is_empty() {
            return Err(GenerateError::NoProcessors);
        }

        let start = Instant::now();

        info!(
            input = %self.context.input_directory.display(),
            output = %self.context.output_directory.display(),
            "starting generation"
        );

        let result = self.run();

        let cleanup = match (&result, &self.temp_folder) {
            (Err(_), Some(temp)) if self.keep_temp_on_error => {
                error!(dir = %temp.display(), "generation failed, keeping temp folder");
                Ok(())
            }
            _ => self.fs.delete_temp_folder(),
        };
        self.temp_folder = None;

        let mut stats = match (result, cleanup) {
            (Ok(stats), Ok(())) => stats,
            (Ok(_), Err(e)) => return Err(e.into()),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(cleanup)) => {
                warn!(error = %cleanup, "failed to delete temp folder");
                return Err(e);
            }
        };

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            inputs = stats.inputs,
            pages = stats.pages,
            copied = stats.copied,
            duration_ms = stats.duration_ms,
            "generation complete"
        );

        Ok(stats)
    }

    fn run(&mut self) -> Result<GenerateStats> {
        // 1. Clear output and prepare the temp folder
        self.fs.delete_directory(&self.context.output_directory)?;
        self.temp_folder = Some(self.fs.create_temp_folder(&self.context.input_directory)?);

        // 2. Scan
        self.context.layout = None;
        self.context.output_files.clear();
        self.context.input_files = self.fs.get_files(&self.context.input_directory)?;
        let inputs = self.context.input_files.clone();

        info!(count = inputs.len(), "found input files");

        // 3. Pre-process
        info!("pre-processing files");
        for processor in &self.processors {
            for file in &inputs {
                processor.pre_process(file, &mut self.context)?;
            }
        }

        // 4. Process, first claim on an output path wins
        info!("processing files");
        let mut outputs = Vec::new();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for processor in &self.processors {
            for file in &inputs {
                let Some(output) = processor.process(file, &self.context)? else {
                    continue;
                };

                let key = output.full_path();
                if let Some(first) = claimed.get(&key) {
                    warn!(
                        output = %key.display(),
                        kept = %first.display(),
                        dropped = %file.full_path().display(),
                        processor = processor.name(),
                        "output path already claimed, dropping"
                    );
                    continue;
                }

                claimed.insert(key, file.full_path());
                outputs.push(output);
            }
        }

        self.context.output_files = outputs;
        debug!(count = self.context.output_files.len(), "processed files");

        // 5. Post-process
        info!("post-processing files");
        for processor in &self.processors {
            for index in 0..self.context.output_files.len() {
                let mut file = self.context.output_files[index].clone();
                processor.post_process(&mut file, &self.context)?;
                self.context.output_files[index] = file;
            }
        }

        // 6. Write
        info!(count = self.context.output_files.len(), "writing output files");
        self.fs.write_output_files(&self.context.output_files)?;

        let copied = self
            .context
            .output_files
            .iter()
            .filter(|f| f.direct_copy)
            .count();

        Ok(GenerateStats {
            inputs: inputs.len(),
            pages: self.context.output_files.len() - copied,
            copied,
            duration_ms: 0,
        })
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}
