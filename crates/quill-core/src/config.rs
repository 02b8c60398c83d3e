//! Site configuration management.
//!
//! Configuration lives in an optional `quill.json` at the root of the input
//! directory. The document holds a single top-level `Config` object whose keys
//! mirror the struct fields in PascalCase:
//!
//! ```json
//! {
//!   "Config": {
//!     "SiteTitle": "Field Notes",
//!     "ExcludeHtmlExtension": false
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// File name of the configuration document inside the input directory.
pub const CONFIG_FILE_NAME: &str = "quill.json";

/// Extension of template (page and layout) files.
pub const TEMPLATE_EXTENSION: &str = ".tera";

/// Extension of Markdown files.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Extension every rendered page is written with.
pub const HTML_EXTENSION: &str = ".html";

/// Configuration for a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Site title, exposed to templates.
    #[serde(default = "default_site_title")]
    pub site_title: String,

    /// File name (without extension) treated as a directory's index page.
    #[serde(default = "default_index_file_name")]
    pub index_file_name: String,

    /// File name (without extension) identifying the layout template.
    #[serde(default = "default_layout_file_name")]
    pub layout_file_name: String,

    /// Extensions the static-copy processor skips.
    #[serde(default = "default_static_extension_ignore_list")]
    pub static_extension_ignore_list: Vec<String>,

    /// Drop the `.html` suffix from written pages and URLs (index pages excepted).
    #[serde(default = "default_true")]
    pub exclude_html_extension: bool,

    /// Enable the extended Markdown rule set.
    #[serde(default)]
    pub enable_markdown_extensions: bool,

    /// Re-indent well-formed HTML output.
    #[serde(default)]
    pub format_html: bool,
}

/// On-disk shape of `quill.json`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "Config", default)]
    config: Config,
}

// Default value functions
fn default_site_title() -> String {
    "My Quill Site".to_string()
}

fn default_index_file_name() -> String {
    "Index".to_string()
}

fn default_layout_file_name() -> String {
    "_Layout".to_string()
}

fn default_static_extension_ignore_list() -> Vec<String> {
    vec![
        TEMPLATE_EXTENSION.to_string(),
        MARKDOWN_EXTENSION.to_string(),
        ".DS_Store".to_string(),
        ".json".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            index_file_name: default_index_file_name(),
            layout_file_name: default_layout_file_name(),
            static_extension_ignore_list: default_static_extension_ignore_list(),
            exclude_html_extension: true,
            enable_markdown_extensions: false,
            format_html: false,
        }
    }
}

impl Config {
    /// Parse configuration from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)?;
        file.config.validate()?;
        Ok(file.config)
    }

    /// Load configuration from a JSON file.
    ///
    /// A missing file is not an error: the defaults apply.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::config_with_source(format!("Failed to read {}", path.display()), e)
        })?;

        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        file.config.validate()?;
        Ok(file.config)
    }

    /// Load `quill.json` from the given input directory.
    pub fn load_from_dir(input_dir: &Path) -> Result<Self> {
        Self::load(&input_dir.join(CONFIG_FILE_NAME))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.index_file_name.trim().is_empty() {
            return Err(CoreError::config("IndexFileName cannot be empty"));
        }

        if self.layout_file_name.trim().is_empty() {
            return Err(CoreError::config("LayoutFileName cannot be empty"));
        }

        if let Some(ext) = self
            .static_extension_ignore_list
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            tracing::warn!(
                extension = %ext,
                "StaticExtensionIgnoreList entries should start with '.'"
            );
        }

        Ok(())
    }

    /// Whether the static-copy processor must skip files with this extension.
    pub fn is_static_ignored(&self, extension: &str) -> bool {
        self.static_extension_ignore_list
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(extension))
    }

    /// Whether a file name denotes a directory index page.
    pub fn is_index_name(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.index_file_name)
    }

    /// Whether a file name denotes the layout template.
    pub fn is_layout_name(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.layout_file_name)
    }
}
