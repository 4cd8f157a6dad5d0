//! Persistence adapters for save records.
//!
//! Provides the [`SaveRepository`] contract plus file-backed and in-memory
//! implementations. The record format lives in [`types`].
mod error;
mod file;
mod memory;
mod traits;
pub mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepo;
pub use traits::SaveRepository;
pub use types::{InitialStateSeed, SaveRecord};
