//! Static asset copying.

use quill_core::{Config, InputFile, OutputFile, url};
use tracing::trace;

use crate::{
    context::GeneratorContext,
    processor::{Processor, Result},
};

/// Copies every file whose extension is not on the static ignore list.
///
/// Assets are never read here; they are copied byte for byte at write time.
#[derive(Debug, Clone)]
pub struct StaticProcessor {
    config: Config,
}

impl StaticProcessor {
    /// Create a processor using `StaticExtensionIgnoreList` from `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Processor for StaticProcessor {
    fn name(&self) -> &'static str {
        "static"
    }

    fn process(&self, file: &InputFile, context: &GeneratorContext) -> Result<Option<OutputFile>> {
        if self.config.is_static_ignored(&file.extension) {
            return Ok(None);
        }

        trace!(path = %file.relative_path(), "claimed static asset");

        Ok(Some(
            OutputFile::new(file, &context.output_directory)
                .direct_copy()
                .with_url(url::get_url(file, &self.config)),
        ))
    }
}
