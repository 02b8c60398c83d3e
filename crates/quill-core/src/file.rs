//! Source and output file model.
//!
//! Every file is described by a base directory (the root it was scanned from or
//! will be written under) and a relative directory. Relative directories always
//! use `/` as separator and always start with `/`; the root itself is `/`.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;

/// Flat front matter key/value pairs.
pub type Metadata = BTreeMap<String, String>;

/// A file discovered in the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InputFile {
    /// File name without extension.
    pub name: String,

    /// Extension including the leading dot, or empty.
    pub extension: String,

    /// Absolute root the file was scanned from.
    pub base_directory: PathBuf,

    /// Directory of the file relative to `base_directory`.
    pub relative_directory: String,
}

impl InputFile {
    /// Create a new input file. The relative directory is normalized to the
    /// `/`-rooted form.
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        base_directory: impl Into<PathBuf>,
        relative_directory: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            base_directory: base_directory.into(),
            relative_directory: normalize_relative_dir(relative_directory.as_ref()),
        }
    }

    /// Build an input file from a path found under `base_directory`.
    ///
    /// Returns `None` if `path` is not inside `base_directory` or has no file name.
    pub fn from_path(path: &Path, base_directory: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let (name, extension) = split_file_name(file_name);

        let parent = path.parent()?.strip_prefix(base_directory).ok()?;
        let relative = parent
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Some(Self::new(name, extension, base_directory, relative))
    }

    /// File name including extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    /// `base_directory` joined with `relative_directory`.
    pub fn full_directory(&self) -> PathBuf {
        join_relative(&self.base_directory, &self.relative_directory)
    }

    /// Absolute path of the file.
    pub fn full_path(&self) -> PathBuf {
        self.full_directory().join(self.file_name())
    }

    /// Path of the file relative to `base_directory`, `/`-rooted.
    pub fn relative_path(&self) -> String {
        join_url(&self.relative_directory, &self.file_name())
    }

    /// Whether the extension matches `extension`, ignoring ASCII case.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extension.eq_ignore_ascii_case(extension)
    }

    /// Partials are include-only fragments, marked by a leading underscore.
    pub fn is_partial(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// A file to be written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    /// The source this output was produced from.
    pub input: InputFile,

    /// File name without extension.
    pub name: String,

    /// Extension including the leading dot. Rewritten by processors.
    pub extension: String,

    /// Output root.
    pub base_directory: PathBuf,

    /// Directory relative to the output root, mirrored from the input.
    pub relative_directory: String,

    /// Front matter extracted from the source.
    pub metadata: Metadata,

    /// Copy bytes verbatim from `input` instead of writing `content`.
    pub direct_copy: bool,

    /// Rendered body.
    pub content: Option<String>,

    /// Public route of the page or asset.
    pub url: Option<String>,
}

impl OutputFile {
    /// Derive an output file from its source and the output root.
    pub fn new(input: &InputFile, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            name: input.name.clone(),
            extension: input.extension.clone(),
            base_directory: output_directory.into(),
            relative_directory: input.relative_directory.clone(),
            input: input.clone(),
            metadata: Metadata::new(),
            direct_copy: false,
            content: None,
            url: None,
        }
    }

    /// Set the extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the public URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Mark the file as a verbatim copy of its source.
    #[must_use]
    pub fn direct_copy(mut self) -> Self {
        self.direct_copy = true;
        self
    }

    /// File name including extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    /// `base_directory` joined with `relative_directory`.
    pub fn full_directory(&self) -> PathBuf {
        join_relative(&self.base_directory, &self.relative_directory)
    }

    /// Absolute output path. Unique per run; the pipeline deduplicates on it.
    pub fn full_path(&self) -> PathBuf {
        self.full_directory().join(self.file_name())
    }

    /// Path relative to the output root, `/`-rooted.
    pub fn relative_path(&self) -> String {
        join_url(&self.relative_directory, &self.file_name())
    }

    /// Whether the extension matches `extension`, ignoring ASCII case.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extension.eq_ignore_ascii_case(extension)
    }
}

/// Split a file name on its last dot: `post.md` → (`post`, `.md`),
/// `.DS_Store` → (``, `.DS_Store`), `Makefile` → (`Makefile`, ``).
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) => file_name.split_at(dot),
        None => (file_name, ""),
    }
}

/// Join a `/`-rooted relative directory and a file name.
pub fn join_url(relative_directory: &str, file_name: &str) -> String {
    if relative_directory.ends_with('/') {
        format!("{relative_directory}{file_name}")
    } else {
        format!("{relative_directory}/{file_name}")
    }
}

fn join_relative(base: &Path, relative_directory: &str) -> PathBuf {
    relative_directory
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

fn normalize_relative_dir(relative: &str) -> String {
    let trimmed = relative.replace('\\', "/");
    let trimmed = trimmed.trim_matches('/');
    format!("/{trimmed}")
}
