//! In-memory collaborators for unit tests.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use quill_core::{InputFile, OutputFile};

use crate::{
    fs::{FileSystem, FsError, Result},
    render::{RenderError, Renderer, template_name},
    view::ViewContext,
};

/// [`FileSystem`] over a path → text map.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    temp: Mutex<Option<(PathBuf, PathBuf)>>,
    temp_files: Mutex<usize>,
    temp_deleted: Mutex<bool>,
    deleted: Mutex<Vec<PathBuf>>,
    written: Mutex<Vec<OutputFile>>,
}

impl MemoryFileSystem {
    pub fn from_pairs(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, content) in files {
            fs.insert(path, content);
        }
        fs
    }

    pub fn insert(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
    }

    pub fn temp_folder(&self) -> Option<PathBuf> {
        self.temp.lock().unwrap().as_ref().map(|(_, p)| p.clone())
    }

    pub fn temp_file_count(&self) -> usize {
        *self.temp_files.lock().unwrap()
    }

    pub fn temp_deleted(&self) -> bool {
        *self.temp_deleted.lock().unwrap()
    }

    pub fn deleted(&self) -> Vec<PathBuf> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn written(&self) -> Vec<OutputFile> {
        self.written.lock().unwrap().clone()
    }
}

impl FileSystem for MemoryFileSystem {
    fn get_files(&self, dir: &Path) -> Result<Vec<InputFile>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|path| path.starts_with(dir))
            .filter_map(|path| InputFile::from_path(path, dir))
            .collect())
    }

    fn read_all_text(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::Io {
                path: path.to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            })
    }

    fn write_output_file(&self, file: &OutputFile) -> Result<()> {
        if !file.direct_copy && file.content.is_none() {
            return Err(FsError::MissingContent(file.input.full_path()));
        }
        self.written.lock().unwrap().push(file.clone());
        Ok(())
    }

    fn delete_directory(&self, path: &Path) -> Result<()> {
        self.deleted.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn copy_output_file(&self, file: &OutputFile) -> Result<()> {
        self.written.lock().unwrap().push(file.clone());
        Ok(())
    }

    fn create_temp_folder(&self, base: &Path) -> Result<PathBuf> {
        let mut temp = self.temp.lock().unwrap();
        let (_, path) = temp.get_or_insert_with(|| (base.to_path_buf(), base.join(".temp")));
        Ok(path.clone())
    }

    fn delete_temp_folder(&self) -> Result<()> {
        if self.temp.lock().unwrap().take().is_some() {
            *self.temp_deleted.lock().unwrap() = true;
        }
        Ok(())
    }

    fn create_temp_file(&self, content: &str, extension: &str) -> Result<InputFile> {
        let (base, folder) = self.temp.lock().unwrap().clone().ok_or(FsError::NoTempFolder)?;

        let mut count = self.temp_files.lock().unwrap();
        *count += 1;
        let path = folder.join(format!("{count}{extension}"));

        self.files
            .lock()
            .unwrap()
            .insert(path.clone(), content.to_string());
        Ok(InputFile::from_path(&path, &base).unwrap())
    }
}

/// [`Renderer`] that returns the template source unchanged. Sources
/// containing `FAIL` produce an error naming the template.
pub struct StubRenderer {
    fs: Arc<MemoryFileSystem>,
    root: PathBuf,
}

impl StubRenderer {
    pub fn new(fs: Arc<MemoryFileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }
}

impl Renderer for StubRenderer {
    fn render(&self, template: &str, _view: &ViewContext<'_>) -> std::result::Result<String, RenderError> {
        let name = template_name(template);
        let source = self
            .fs
            .read_all_text(&self.root.join(&name))
            .map_err(|e| RenderError::Template(e.to_string()))?;

        if source.contains("FAIL") {
            return Err(RenderError::Template(format!(
                "Failed to render '{name}': Variable `x` not found"
            )));
        }
        Ok(source)
    }
}
