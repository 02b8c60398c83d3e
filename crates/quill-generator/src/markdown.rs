//! Markdown pages.

use std::sync::Arc;

use quill_core::{
    Config, InputFile, OutputFile,
    config::{HTML_EXTENSION, MARKDOWN_EXTENSION},
    frontmatter, url,
};
use quill_parser::MarkdownParser;
use tracing::debug;

use crate::{
    context::GeneratorContext,
    fs::FileSystem,
    processor::{Processor, Result},
};

/// Converts `.md` files to HTML.
///
/// The output is the bare page body. Layout wrapping happens later in
/// [`TemplateProcessor`](crate::TemplateProcessor).
pub struct MarkdownProcessor {
    fs: Arc<dyn FileSystem>,
    config: Config,
    parser: MarkdownParser,
}

impl MarkdownProcessor {
    /// Create a processor. The Markdown rule set follows
    /// `EnableMarkdownExtensions`.
    pub fn new(fs: Arc<dyn FileSystem>, config: Config) -> Self {
        let parser = MarkdownParser::from_flag(config.enable_markdown_extensions);
        Self { fs, config, parser }
    }
}

impl Processor for MarkdownProcessor {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(&self, file: &InputFile, context: &GeneratorContext) -> Result<Option<OutputFile>> {
        if !file.has_extension(MARKDOWN_EXTENSION) {
            return Ok(None);
        }

        let path = file.full_path();
        let text = self.fs.read_all_text(&path)?;
        if text.trim().is_empty() {
            debug!(path = %path.display(), "skipping empty markdown file");
            return Ok(None);
        }

        let (metadata, body) = frontmatter::extract_markdown(&text, &path);
        let html = self.parser.to_html(body);

        let output = OutputFile::new(file, &context.output_directory)
            .with_extension(HTML_EXTENSION)
            .with_content(html)
            .with_metadata(metadata)
            .with_url(url::get_url(file, &self.config));

        debug!(path = %path.display(), "converted markdown");
        Ok(Some(output))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::testing::MemoryFileSystem;

    fn processor(files: &[(&str, &str)], config: Config) -> MarkdownProcessor {
        MarkdownProcessor::new(Arc::new(MemoryFileSystem::from_pairs(files)), config)
    }

    fn context() -> GeneratorContext {
        GeneratorContext::new("/site", "/out")
    }

    #[test]
    fn test_converts_markdown_with_front_matter() {
        let md = processor(
            &[("/site/blog/post.md", "---\ntitle: Hello\n---\n# Post")],
            Config::default(),
        );
        let file = InputFile::new("post", ".md", "/site", "/blog");

        let output = md.process(&file, &context()).unwrap().expect("output");

        assert_eq!(output.extension, ".html");
        assert_eq!(output.content.as_deref(), Some("<h1>Post</h1>\n"));
        assert_eq!(output.metadata["title"], "Hello");
        assert_eq!(output.url.as_deref(), Some("/blog/post"));
        assert_eq!(output.base_directory, Path::new("/out"));
        assert!(!output.direct_copy);
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let md = processor(&[("/site/README.MD", "text")], Config::default());
        let file = InputFile::new("README", ".MD", "/site", "/");

        assert!(md.process(&file, &context()).unwrap().is_some());
    }

    #[test]
    fn test_ignores_other_extensions() {
        let md = processor(&[], Config::default());
        let file = InputFile::new("style", ".css", "/site", "/");

        assert!(md.process(&file, &context()).unwrap().is_none());
    }

    #[test]
    fn test_whitespace_only_file_is_skipped() {
        let md = processor(&[("/site/empty.md", "  \n\t\n")], Config::default());
        let file = InputFile::new("empty", ".md", "/site", "/");

        assert!(md.process(&file, &context()).unwrap().is_none());
    }

    #[test]
    fn test_extensions_follow_config() {
        let source = "| a |\n|---|\n| 1 |\n";
        let file = InputFile::new("table", ".md", "/site", "/");

        let plain = processor(&[("/site/table.md", source)], Config::default());
        let extended = processor(
            &[("/site/table.md", source)],
            Config {
                enable_markdown_extensions: true,
                ..Config::default()
            },
        );

        let plain = plain.process(&file, &context()).unwrap().unwrap();
        let extended = extended.process(&file, &context()).unwrap().unwrap();

        assert!(!plain.content.unwrap().contains("<table>"));
        assert!(extended.content.unwrap().contains("<table>"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let md = processor(&[], Config::default());
        let file = InputFile::new("gone", ".md", "/site", "/");

        assert!(md.process(&file, &context()).is_err());
    }
}
