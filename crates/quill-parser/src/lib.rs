//! Quill Parser Library
//!
//! Markdown to HTML conversion.

pub mod markdown;

pub use markdown::MarkdownParser;
