//! HTML re-indentation.

use quick_xml::{Reader, Writer, events::Event};
use quill_core::{Config, OutputFile, config::HTML_EXTENSION};
use tracing::{debug, warn};

use crate::{
    context::GeneratorContext,
    processor::{Processor, Result},
};

/// Re-indents rendered pages when `FormatHtml` is set.
///
/// Pages that are not well-formed XML are left as they are and reported.
#[derive(Debug, Clone)]
pub struct HtmlFormatProcessor {
    enabled: bool,
}

impl HtmlFormatProcessor {
    /// Create a processor; it does nothing unless `FormatHtml` is set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.format_html,
        }
    }
}

impl Processor for HtmlFormatProcessor {
    fn name(&self) -> &'static str {
        "html-format"
    }

    fn post_process(&self, file: &mut OutputFile, _context: &GeneratorContext) -> Result<()> {
        if !self.enabled || !file.has_extension(HTML_EXTENSION) {
            return Ok(());
        }

        let Some(content) = file.content.as_deref().filter(|c| !c.trim().is_empty()) else {
            return Ok(());
        };

        match format_html(content) {
            Ok(formatted) => {
                debug!(page = %file.input.relative_path(), "formatted html");
                file.content = Some(formatted);
            }
            Err(e) => {
                warn!(page = %file.input.relative_path(), error = %e, "html is not well-formed, leaving it unformatted");
            }
        }
        Ok(())
    }
}

/// Re-serialize markup with two-space indentation.
///
/// The markup must be a single element tree: every element closed and only
/// one element at the top level.
pub fn format_html(content: &str) -> std::result::Result<String, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match &event {
            Event::Eof => {
                if depth != 0 {
                    return Err(format!("{depth} element(s) left unclosed"));
                }
                break;
            }
            Event::Start(_) | Event::Empty(_) if depth == 0 => {
                roots += 1;
                if roots > 1 {
                    return Err("more than one root element".to_string());
                }
            }
            _ => {}
        }
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        writer.write_event(event).map_err(|e| e.to_string())?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use quill_core::InputFile;

    use super::*;

    fn page(content: &str) -> OutputFile {
        let input = InputFile::new("page", ".md", "/site", "/");
        OutputFile::new(&input, "/out")
            .with_extension(".html")
            .with_content(content)
    }

    fn enabled() -> HtmlFormatProcessor {
        HtmlFormatProcessor::new(&Config {
            format_html: true,
            ..Config::default()
        })
    }

    fn context() -> GeneratorContext {
        GeneratorContext::new("/site", "/out")
    }

    #[test]
    fn test_indents_nested_markup() {
        let formatted = format_html("<div><p>Hi</p></div>").unwrap();

        assert!(formatted.starts_with("<div>"));
        assert!(formatted.contains("\n  <p>Hi</p>"), "{formatted}");
        assert!(formatted.ends_with("</div>"));
    }

    #[test]
    fn test_malformed_markup_is_left_alone() {
        let mut file = page("<div><p>unclosed</div>");
        enabled().post_process(&mut file, &context()).unwrap();

        assert_eq!(file.content.as_deref(), Some("<div><p>unclosed</div>"));
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        assert!(format_html("<div><p>unclosed</p>").is_err());
    }

    #[test]
    fn test_multiple_roots_are_an_error() {
        assert!(format_html("<h1>a</h1><p>b</p>").is_err());

        let mut file = page("<h1>a</h1><p>b</p>");
        enabled().post_process(&mut file, &context()).unwrap();
        assert_eq!(file.content.as_deref(), Some("<h1>a</h1><p>b</p>"));
    }

    #[test]
    fn test_disabled_by_default() {
        let mut file = page("<div><p>Hi</p></div>");
        HtmlFormatProcessor::new(&Config::default())
            .post_process(&mut file, &context())
            .unwrap();

        assert_eq!(file.content.as_deref(), Some("<div><p>Hi</p></div>"));
    }

    #[test]
    fn test_skips_non_html_output() {
        let input = InputFile::new("style", ".css", "/site", "/");
        let mut file = OutputFile::new(&input, "/out").direct_copy();

        enabled().post_process(&mut file, &context()).unwrap();

        assert!(file.content.is_none());
    }
}
