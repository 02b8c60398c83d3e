//! Markdown parser using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// CommonMark to HTML converter.
///
/// The base rule set is plain CommonMark. The extended set adds tables,
/// footnotes, strikethrough, task lists and heading attributes.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a parser with the CommonMark rule set.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    /// Create a parser with the extended rule set.
    pub fn with_extensions() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Pick the rule set from a configuration flag.
    pub fn from_flag(enable_extensions: bool) -> Self {
        if enable_extensions {
            Self::with_extensions()
        } else {
            Self::new()
        }
    }

    /// Render a Markdown body to HTML.
    pub fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}
