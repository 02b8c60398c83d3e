//! File system access used by the pipeline.
//!
//! The pipeline never touches the disk directly. It goes through
//! [`FileSystem`], which [`DiskFileSystem`] implements on top of `std::fs`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use quill_core::{Config, InputFile, OutputFile, config::HTML_EXTENSION};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use walkdir::WalkDir;

/// File system errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// IO error on a specific path.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk error.
    #[error("failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A temp file was requested before the temp folder exists.
    #[error("temp folder must be created before temp file")]
    NoTempFolder,

    /// A rendered file reached the write step without content.
    #[error("no content to write for {0}")]
    MissingContent(PathBuf),
}

impl FsError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for file system operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// File system operations the pipeline depends on.
pub trait FileSystem {
    /// All files under `dir`, recursively.
    fn get_files(&self, dir: &Path) -> Result<Vec<InputFile>>;

    /// Read a file as UTF-8 text.
    fn read_all_text(&self, path: &Path) -> Result<String>;

    /// Persist one output file.
    fn write_output_file(&self, file: &OutputFile) -> Result<()>;

    /// Persist output files one after another.
    fn write_output_files(&self, files: &[OutputFile]) -> Result<()> {
        files.iter().try_for_each(|file| self.write_output_file(file))
    }

    /// Delete a directory tree. No-op if absent.
    fn delete_directory(&self, path: &Path) -> Result<()>;

    /// Copy the output's source bytes to the output path.
    fn copy_output_file(&self, file: &OutputFile) -> Result<()>;

    /// Create the run's temp folder under `base`. Repeated calls return the
    /// first folder.
    fn create_temp_folder(&self, base: &Path) -> Result<PathBuf>;

    /// Delete the temp folder. No-op if none was created.
    fn delete_temp_folder(&self) -> Result<()>;

    /// Write `content` to a fresh file in the temp folder.
    fn create_temp_file(&self, content: &str, extension: &str) -> Result<InputFile>;
}

#[derive(Debug, Clone)]
struct TempFolder {
    base: PathBuf,
    path: PathBuf,
}

/// [`FileSystem`] backed by the real disk.
#[derive(Debug)]
pub struct DiskFileSystem {
    config: Config,
    temp: Mutex<Option<TempFolder>>,
}

impl DiskFileSystem {
    /// Create a disk file system for the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            temp: Mutex::new(None),
        }
    }

    /// Path of the current temp folder, if one exists.
    pub fn temp_folder(&self) -> Option<PathBuf> {
        self.temp_state().as_ref().map(|t| t.path.clone())
    }

    fn temp_state(&self) -> std::sync::MutexGuard<'_, Option<TempFolder>> {
        self.temp.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Final on-disk path of an output file.
    ///
    /// With `ExcludeHtmlExtension`, `.html` is dropped from every page except
    /// the directory index.
    pub fn target_path(&self, file: &OutputFile) -> PathBuf {
        if self.config.exclude_html_extension
            && file.has_extension(HTML_EXTENSION)
            && !self.config.is_index_name(&file.name)
        {
            file.full_directory().join(&file.name)
        } else {
            file.full_path()
        }
    }

    fn copy_to(&self, file: &OutputFile, target: &Path) -> Result<()> {
        let dir = file.full_directory();
        fs::create_dir_all(&dir).map_err(|e| FsError::io(&dir, e))?;

        let source = file.input.full_path();
        fs::copy(&source, target).map_err(|e| FsError::io(&source, e))?;

        debug!(src = %source.display(), dest = %target.display(), "copied file");
        Ok(())
    }
}

impl FileSystem for DiskFileSystem {
    fn get_files(&self, dir: &Path) -> Result<Vec<InputFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| FsError::Walk {
                path: dir.to_path_buf(),
                source: e,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            match InputFile::from_path(entry.path(), dir) {
                Some(file) => files.push(file),
                None => warn!(path = %entry.path().display(), "skipping file with a non UTF-8 name"),
            }
        }

        debug!(dir = %dir.display(), count = files.len(), "scanned files");
        Ok(files)
    }

    fn read_all_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| FsError::io(path, e))
    }

    fn write_output_file(&self, file: &OutputFile) -> Result<()> {
        let target = self.target_path(file);

        if file.direct_copy {
            return self.copy_to(file, &target);
        }

        let content = file
            .content
            .as_deref()
            .ok_or_else(|| FsError::MissingContent(file.input.full_path()))?;

        let dir = file.full_directory();
        fs::create_dir_all(&dir).map_err(|e| FsError::io(&dir, e))?;
        fs::write(&target, content).map_err(|e| FsError::io(&target, e))?;

        info!(path = %target.display(), "wrote output file");
        Ok(())
    }

    fn delete_directory(&self, path: &Path) -> Result<()> {
        if path.exists() {
            debug!(dir = %path.display(), "deleting directory");
            fs::remove_dir_all(path).map_err(|e| FsError::io(path, e))?;
        }
        Ok(())
    }

    fn copy_output_file(&self, file: &OutputFile) -> Result<()> {
        self.copy_to(file, &file.full_path())
    }

    fn create_temp_folder(&self, base: &Path) -> Result<PathBuf> {
        let mut temp = self.temp_state();
        if let Some(existing) = temp.as_ref() {
            return Ok(existing.path.clone());
        }

        let path = base.join(format!(".quill-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).map_err(|e| FsError::io(&path, e))?;
        debug!(dir = %path.display(), "created temp folder");

        *temp = Some(TempFolder {
            base: base.to_path_buf(),
            path: path.clone(),
        });
        Ok(path)
    }

    fn delete_temp_folder(&self) -> Result<()> {
        let Some(temp) = self.temp_state().take() else {
            return Ok(());
        };
        self.delete_directory(&temp.path)
    }

    fn create_temp_file(&self, content: &str, extension: &str) -> Result<InputFile> {
        let temp = self.temp_state().clone().ok_or(FsError::NoTempFolder)?;

        let path = temp.path.join(format!("{}{extension}", Uuid::new_v4()));
        fs::write(&path, content).map_err(|e| FsError::io(&path, e))?;

        InputFile::from_path(&path, &temp.base).ok_or_else(|| {
            FsError::io(
                &path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "temp file is outside its base directory",
                ),
            )
        })
    }
}
