//! In-memory DocumentRepository implementation for tests and local runs.

use std::sync::RwLock;

use arrows_core::Document;

use crate::repository::{DocumentRepository, RepositoryError, Result};

/// In-memory document slot guarded by an `RwLock`.
pub struct InMemoryRepository {
    slot: RwLock<Option<Document>>,
}

impl InMemoryRepository {
    /// Create an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Create with a pre-seeded document.
    pub fn with_document(document: Document) -> Self {
        Self {
            slot: RwLock::new(Some(document)),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRepository for InMemoryRepository {
    fn load(&self) -> Result<Option<Document>> {
        let slot = self.slot.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, document: &Document) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(document.clone());
        Ok(())
    }
}
