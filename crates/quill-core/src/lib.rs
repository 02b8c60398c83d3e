//! Quill Core Library
//!
//! File model, configuration, URL resolution and front matter extraction shared
//! by the Quill processors.

pub mod config;
pub mod error;
pub mod file;
pub mod frontmatter;
pub mod url;

pub use config::Config;
pub use error::{CoreError, Result};
pub use file::{InputFile, Metadata, OutputFile};
pub use url::get_url;
