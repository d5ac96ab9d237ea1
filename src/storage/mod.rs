//! Storage primitive for flat record collections
//!
//! Each collection is one JSON array stored under a name. Reads tolerate
//! absence and corruption; writes replace the whole collection and report
//! failure through [`StorageResult`].

mod backend;
mod collection;
mod errors;

pub use backend::{validate_collection_name, CollectionBackend, FileBackend, MemoryBackend};
pub use collection::{load_collection, save_collection, LoadOutcome, Loaded};
pub use errors::{StorageError, StorageResult};
