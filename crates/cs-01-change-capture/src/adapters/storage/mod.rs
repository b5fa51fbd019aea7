//! Storage Adapters
//!
//! Implementations of the `RecordStore` trait.

mod memory;
#[cfg(feature = "file-store")]
mod file;

pub use memory::InMemoryRecordStore;
#[cfg(feature = "file-store")]
pub use file::FileBackedRecordStore;
