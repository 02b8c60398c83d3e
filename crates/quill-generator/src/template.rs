//! Template pages and layout wrapping.

use std::sync::Arc;

use quill_core::{
    Config, InputFile, OutputFile,
    config::{HTML_EXTENSION, MARKDOWN_EXTENSION, TEMPLATE_EXTENSION},
    frontmatter, url,
};
use tracing::{debug, info};

use crate::{
    context::GeneratorContext,
    fs::FileSystem,
    processor::{ProcessError, Processor, Result},
    render::{Renderer, layout_directive},
    view::ViewContext,
};

/// Renders `.tera` pages and wraps every page in the site layout.
///
/// - `pre_process` finds the layout. With several candidates the last one
///   scanned wins.
/// - `process` claims `.tera` pages, skipping the layout and partials
///   (names starting with `_`). Content is left empty until post-processing.
/// - `post_process` renders template pages and Markdown output through the
///   [`Renderer`], inside the layout when there is one.
pub struct TemplateProcessor {
    fs: Arc<dyn FileSystem>,
    config: Config,
    renderer: Box<dyn Renderer>,
}

impl TemplateProcessor {
    /// Create a processor rendering through `renderer`.
    pub fn new(fs: Arc<dyn FileSystem>, config: Config, renderer: impl Renderer + 'static) -> Self {
        Self {
            fs,
            config,
            renderer: Box::new(renderer),
        }
    }

    fn is_page(&self, file: &InputFile, context: &GeneratorContext) -> bool {
        file.has_extension(TEMPLATE_EXTENSION)
            && context.layout.as_ref() != Some(file)
            && !file.is_partial()
    }

    /// Page body to render, or `None` when there is nothing to wrap.
    fn body(&self, output: &OutputFile, context: &GeneratorContext) -> Result<Option<String>> {
        let input = &output.input;

        let body = if input.has_extension(MARKDOWN_EXTENSION) {
            output.content.clone()
        } else if self.is_page(input, context) {
            Some(self.fs.read_all_text(&input.full_path())?)
        } else {
            None
        };

        Ok(body.filter(|b| !b.trim().is_empty()))
    }
}

impl Processor for TemplateProcessor {
    fn name(&self) -> &'static str {
        "template"
    }

    fn pre_process(&self, file: &InputFile, context: &mut GeneratorContext) -> Result<()> {
        if file.has_extension(TEMPLATE_EXTENSION) && self.config.is_layout_name(&file.name) {
            debug!(path = %file.relative_path(), "found layout");
            context.layout = Some(file.clone());
        }
        Ok(())
    }

    fn process(&self, file: &InputFile, context: &GeneratorContext) -> Result<Option<OutputFile>> {
        if !self.is_page(file, context) {
            return Ok(None);
        }

        let path = file.full_path();
        let source = self.fs.read_all_text(&path)?;
        if source.trim().is_empty() {
            debug!(path = %path.display(), "skipping empty template");
            return Ok(None);
        }

        let metadata = frontmatter::extract_template(&source, &path);

        Ok(Some(
            OutputFile::new(file, &context.output_directory)
                .with_extension(HTML_EXTENSION)
                .with_metadata(metadata)
                .with_url(url::get_url(file, &self.config)),
        ))
    }

    fn post_process(&self, output: &mut OutputFile, context: &GeneratorContext) -> Result<()> {
        let Some(body) = self.body(output, context)? else {
            return Ok(());
        };

        let directive = context
            .layout
            .as_ref()
            .map(|layout| layout_directive(&layout.relative_path()))
            .unwrap_or_default();

        let temp = self
            .fs
            .create_temp_file(&format!("{directive}{body}"), TEMPLATE_EXTENSION)?;
        let template = temp.relative_path();

        let rendered = {
            let view = ViewContext::new(output, context, &self.config);
            self.renderer.render(&template, &view)
        };

        match rendered {
            Ok(html) => {
                info!(page = %output.input.relative_path(), "rendered page");
                output.content = Some(html);
                Ok(())
            }
            Err(e) => {
                let source = output.input.full_path();
                let source = source.display().to_string();
                let message = e
                    .to_string()
                    .replace(&temp.full_path().display().to_string(), &source)
                    .replace(template.trim_start_matches('/'), &source);

                Err(ProcessError::Render {
                    path: output.input.full_path(),
                    message,
                })
            }
        }
    }
}
