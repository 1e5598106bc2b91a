//! File-based DocumentRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use arrows_core::Document;

use crate::repository::{DocumentRepository, RepositoryError, Result};

/// Stores the document as a single pretty-printed JSON file.
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// never observes a half-written document.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository rooted at `path`, creating parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let document = serde_json::from_slice(&bytes).map_err(RepositoryError::Json)?;

        tracing::debug!("Loaded document from {}", self.path.display());

        Ok(Some(document))
    }

    fn save(&self, document: &Document) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(document).map_err(RepositoryError::Json)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved document to {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use arrows_core::{GameConfig, LoginRequest, PlayerId, Reconciler, Timestamp};

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("arrows_data.json")).unwrap();
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn saved_document_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("arrows_data.json")).unwrap();

        let mut document = Document::default();
        Reconciler::new(&mut document, &GameConfig::default())
            .login(
                &LoginRequest {
                    player_id: PlayerId::new("777"),
                    handle: Some("nova".to_owned()),
                    ..LoginRequest::default()
                },
                Timestamp::new(1_700_000_000),
            )
            .unwrap();

        repo.save(&document).unwrap();
        assert_eq!(repo.load().unwrap(), Some(document));
    }

    #[test]
    fn corrupt_file_surfaces_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arrows_data.json");
        fs::write(&path, b"not json").unwrap();

        let repo = JsonFileRepository::new(&path).unwrap();
        assert!(matches!(
            repo.load().unwrap_err(),
            RepositoryError::Json(_)
        ));
    }
}
