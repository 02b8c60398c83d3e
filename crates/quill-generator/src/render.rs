//! Template rendering.
//!
//! [`TeraRenderer`] renders `.tera` templates found under the input root. A
//! template whose first line is a layout directive
//!
//! ```text
//! {# layout ~/_Layout.tera #}
//! ```
//!
//! is rendered first, then handed to the named layout as `body`. Layouts may
//! carry their own directive.

use std::{
    collections::HashSet,
    error::Error as StdError,
    fs,
    path::{Path, PathBuf},
};

use quill_core::config::TEMPLATE_EXTENSION;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::view::ViewContext;

/// Opening of a layout directive.
pub const LAYOUT_DIRECTIVE_START: &str = "{# layout ";

/// Closing of a layout directive.
pub const LAYOUT_DIRECTIVE_END: &str = "#}";

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Templates under the root could not be loaded.
    #[error("failed to load templates: {0}")]
    Load(String),

    /// Template source could not be read.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template rendering failed.
    #[error("{0}")]
    Template(String),

    /// A layout refers back to itself through its directives.
    #[error("layout cycle detected at {0}")]
    LayoutCycle(String),
}

/// Renders a template against a view.
pub trait Renderer {
    /// Render the template at `template` (a root-relative path, optionally
    /// prefixed with `~/` or `/`).
    fn render(&self, template: &str, view: &ViewContext<'_>) -> Result<String, RenderError>;
}

/// Build the directive line that makes a page render inside `layout`.
pub fn layout_directive(layout: &str) -> String {
    let layout = layout.replace('\\', "/");
    let layout = layout.trim_start_matches('/');
    format!("{LAYOUT_DIRECTIVE_START}~/{layout} {LAYOUT_DIRECTIVE_END}\n")
}

/// Layout named by a directive on the first line of `source`.
pub fn parse_layout_directive(source: &str) -> Option<String> {
    let first = source.lines().next()?.trim();
    let path = first
        .strip_prefix(LAYOUT_DIRECTIVE_START)?
        .strip_suffix(LAYOUT_DIRECTIVE_END)?
        .trim();

    (!path.is_empty()).then(|| template_name(path))
}

/// Normalize `~/a/b.tera`, `/a/b.tera` and `a\b.tera` to `a/b.tera`.
pub fn template_name(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.strip_prefix("~/").unwrap_or(&path);
    path.trim_start_matches('/').to_string()
}

/// [`Renderer`] backed by Tera.
///
/// Templates are loaded from disk on every render, so files created during
/// the run (such as temp pages) are always visible. Each render walks the
/// root and parses every template again, which costs pages × templates.
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    root: PathBuf,
}

impl TeraRenderer {
    /// Create a renderer for templates under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load all site templates plus `requested`, which may live in a hidden
    /// directory the scan skips.
    fn load(&self, requested: &str) -> Result<Tera, RenderError> {
        let mut files: Vec<(PathBuf, Option<String>)> = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && is_template(e.path()))
            .filter_map(|e| {
                let name = relative_name(e.path(), &self.root)?;
                Some((e.path().to_path_buf(), Some(name)))
            })
            .collect();

        if !files.iter().any(|(_, name)| name.as_deref() == Some(requested)) {
            files.push((self.root.join(requested), Some(requested.to_string())));
        }

        debug!(count = files.len(), "loading templates");

        let mut tera = Tera::default();
        tera.add_template_files(files)
            .map_err(|e| RenderError::Load(error_chain(&e)))?;
        Ok(tera)
    }

    fn read_source(&self, name: &str) -> Result<String, RenderError> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|source| RenderError::Io { path, source })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template: &str, view: &ViewContext<'_>) -> Result<String, RenderError> {
        let name = template_name(template);
        let tera = self.load(&name)?;

        let mut context =
            Context::from_serialize(view).map_err(|e| RenderError::Template(error_chain(&e)))?;

        let mut output = tera
            .render(&name, &context)
            .map_err(|e| RenderError::Template(error_chain(&e)))?;

        let mut seen = HashSet::from([name.clone()]);
        let mut current = name;

        while let Some(layout) = parse_layout_directive(&self.read_source(&current)?) {
            if !seen.insert(layout.clone()) {
                return Err(RenderError::LayoutCycle(layout));
            }

            debug!(template = %current, layout = %layout, "applying layout");

            let body = output.strip_prefix('\n').unwrap_or(&output).to_string();
            context.insert("body", &body);
            output = tera
                .render(&layout, &context)
                .map_err(|e| RenderError::Template(error_chain(&e)))?;
            current = layout;
        }

        Ok(output)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_template(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION.trim_start_matches('.')))
}

fn relative_name(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// Join an error and all of its sources into one line.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
