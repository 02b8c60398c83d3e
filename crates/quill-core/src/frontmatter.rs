//! Front matter extraction.
//!
//! Two conventions share one YAML block format:
//!
//! - Markdown files open with a `---` line and close the block with the next
//!   `---`. The block is removed from the body.
//! - Template files carry a Tera comment anywhere in the source:
//!   `{#META ... #}`. The block stays in the source; Tera ignores comments.
//!
//! Blocks are parsed into flat string maps. A malformed block is never fatal:
//! it is logged and the file continues with empty metadata.

use std::path::Path;

use serde_yaml::Value;

use crate::{
    error::{CoreError, Result},
    file::Metadata,
};

/// Opening and closing delimiter of a Markdown front matter block.
pub const MARKDOWN_DELIMITER: &str = "---";

/// Start marker of a template metadata block.
pub const TEMPLATE_META_START: &str = "{#META";

/// End marker of a template metadata block.
pub const TEMPLATE_META_END: &str = "#}";

/// Split Markdown content into its YAML block and the remaining body.
///
/// Returns `None` if the content does not start with `---` or the block is
/// never closed.
pub fn split_markdown(content: &str) -> Option<(&str, &str)> {
    let after_first = content.strip_prefix(MARKDOWN_DELIMITER)?;
    let closing_pos = after_first.find(MARKDOWN_DELIMITER)?;

    let yaml = &after_first[..closing_pos];
    let body = &after_first[closing_pos + MARKDOWN_DELIMITER.len()..];
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);

    Some((yaml, body))
}

/// Find the YAML block between `{#META` and the following `#}`.
pub fn find_template_block(content: &str) -> Option<&str> {
    let start = content.find(TEMPLATE_META_START)? + TEMPLATE_META_START.len();
    let length = content[start..].find(TEMPLATE_META_END)?;
    Some(&content[start..start + length])
}

/// Parse a YAML block into flat metadata.
///
/// Scalars are stringified; `null` becomes an empty string. Nested sequences
/// or mappings are rejected.
pub fn parse_metadata(yaml: &str, path: &Path) -> Result<Metadata> {
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| CoreError::front_matter(path, e.to_string()))?;

    let mapping = match value {
        Value::Null => return Ok(Metadata::new()),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(CoreError::front_matter(
                path,
                "front matter must be a mapping of keys to values",
            ));
        }
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = scalar_to_string(&key)
            .ok_or_else(|| CoreError::front_matter(path, "front matter keys must be scalars"))?;
        let value = scalar_to_string(&value).ok_or_else(|| {
            CoreError::front_matter(path, format!("value of `{key}` must be a scalar"))
        })?;
        metadata.insert(key, value);
    }

    Ok(metadata)
}

/// Extract Markdown front matter, returning the metadata and the body.
///
/// Without a complete block the content is returned untouched.
pub fn extract_markdown<'a>(content: &'a str, path: &Path) -> (Metadata, &'a str) {
    let Some((yaml, body)) = split_markdown(content) else {
        return (Metadata::new(), content);
    };

    (parse_or_log(yaml, path), body)
}

/// Extract template metadata. The content itself is never modified.
pub fn extract_template(content: &str, path: &Path) -> Metadata {
    match find_template_block(content) {
        Some(yaml) => parse_or_log(yaml, path),
        None => Metadata::new(),
    }
}

fn parse_or_log(yaml: &str, path: &Path) -> Metadata {
    parse_metadata(yaml, path).unwrap_or_else(|e| {
        tracing::error!(path = %path.display(), error = %e, "error parsing YAML metadata");
        Metadata::new()
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
