//! Public URL resolution.

use crate::{
    config::{Config, HTML_EXTENSION, MARKDOWN_EXTENSION, TEMPLATE_EXTENSION},
    file::{InputFile, join_url},
};

/// Public URL of `file` under `config`.
///
/// Index pages resolve to their directory. Markdown and template pages
/// become `.html`, which is dropped again when `ExcludeHtmlExtension` is set.
/// Every other extension passes through.
pub fn get_url(file: &InputFile, config: &Config) -> String {
    if config.is_index_name(&file.name) {
        return file.relative_directory.clone();
    }

    let extension = effective_extension(&file.extension);
    let extension = if config.exclude_html_extension && extension.eq_ignore_ascii_case(HTML_EXTENSION)
    {
        ""
    } else {
        extension
    };

    join_url(&file.relative_directory, &format!("{}{extension}", file.name))
}

/// Extension a file will carry once rendered.
pub fn effective_extension(extension: &str) -> &str {
    if extension.eq_ignore_ascii_case(TEMPLATE_EXTENSION)
        || extension.eq_ignore_ascii_case(MARKDOWN_EXTENSION)
    {
        HTML_EXTENSION
    } else {
        extension
    }
}
