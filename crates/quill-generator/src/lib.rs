//! Quill Generator
//!
//! The processor pipeline: Markdown conversion, Tera templates and layouts,
//! static asset copying and optional HTML formatting, driven by a
//! [`Generator`] over a [`FileSystem`].
//!
//! # Modules
//!
//! - [`generator`] - Run orchestration
//! - [`processor`] - The three-phase processor contract
//! - [`markdown`] - Markdown pages
//! - [`template`] - Template pages and layout wrapping
//! - [`assets`] - Static asset copying
//! - [`format`] - HTML re-indentation
//! - [`render`] - Tera rendering and layout directives
//! - [`view`] - The view handed to templates
//! - [`fs`] - File system access

pub mod assets;
pub mod context;
pub mod format;
pub mod fs;
pub mod generator;
pub mod markdown;
pub mod processor;
pub mod render;
pub mod template;
pub mod view;

#[cfg(test)]
mod testing;

pub use assets::StaticProcessor;
pub use context::GeneratorContext;
pub use format::HtmlFormatProcessor;
pub use fs::{DiskFileSystem, FileSystem, FsError};
pub use generator::{GenerateError, GenerateStats, Generator};
pub use markdown::MarkdownProcessor;
pub use processor::{ProcessError, Processor};
pub use render::{RenderError, Renderer, TeraRenderer};
pub use template::TemplateProcessor;
pub use view::ViewContext;
