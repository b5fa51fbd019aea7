//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the change capture subsystem.

use crate::domain::StoreError;

/// Result of a prefix scan: `(key, value)` pairs.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for the storage engine behind a system-of-record.
///
/// Treated as an opaque key-value store. Implementations provide their own
/// interior locking so one store can back several repositories.
pub trait RecordStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Insert or overwrite a value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Write `value` only if `key` is absent, as one atomic step.
    ///
    /// Returns `false` and leaves the store untouched when the key exists.
    fn insert_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, StoreError>;

    /// Delete a key. Returns whether it was present.
    fn delete(&self, key: &[u8]) -> Result<bool, StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// All pairs whose key starts with `prefix`, ordered by key.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StoreError>;
}
