//! Persistence contract for the document aggregate.

use arrows_core::Document;

use super::Result;

/// Gateway for loading and saving the combined document.
///
/// The document is read and written as a whole on every request; there are
/// no partial updates and no schema versioning.
pub trait DocumentRepository: Send + Sync {
    /// Load the persisted document; `None` when no prior state exists.
    fn load(&self) -> Result<Option<Document>>;

    /// Persist the document, replacing any previous contents.
    fn save(&self, document: &Document) -> Result<()>;
}
