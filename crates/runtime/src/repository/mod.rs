//! Document persistence: the gateway contract and its implementations.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use traits::DocumentRepository;
