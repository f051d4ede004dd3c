//! Where raw quiz definitions come from.

use std::fs;
use std::path::{Path, PathBuf};

use super::content::RawQuiz;
use super::loader::LoadError;

const QUIZ_FILE_EXTENSION: &str = "json";

/// Supplies raw quiz definitions by id.
pub trait ContentSource {
    fn list_quiz_ids(&self) -> Result<Vec<String>, LoadError>;

    fn load_quiz_definition(&self, id: &str) -> Result<RawQuiz, LoadError>;
}

/// Reads `<root>/<id>.json` files.
#[derive(Debug, Clone)]
pub struct DirectoryContentSource {
    root: PathBuf,
}

impl DirectoryContentSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn quiz_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, QUIZ_FILE_EXTENSION))
    }
}

impl ContentSource for DirectoryContentSource {
    /// File stems of every `.json` file in the directory, sorted.
    fn list_quiz_ids(&self) -> Result<Vec<String>, LoadError> {
        let io_error = |source| LoadError::Io {
            path: self.root.clone(),
            source,
        };

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(QUIZ_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn load_quiz_definition(&self, id: &str) -> Result<RawQuiz, LoadError> {
        let path = self.quiz_path(id);
        let json = fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })?;
        serde_json::from_str(&json).map_err(|source| LoadError::Parse {
            quiz_id: id.to_string(),
            source,
        })
    }
}
