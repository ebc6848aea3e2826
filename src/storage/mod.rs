//! Persistence medium: a small synchronous key-value interface.
//!
//! Everything the console remembers (system config blob, active role,
//! per-role widget order) is a string value under a string key.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Synchronous key-value medium.
///
/// Receivers are `&self` so a change listener can re-read state while a
/// write is still being dispatched.
pub trait KeyValueStore: Send + Sync {
    /// Value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    /// Bring an unreadable medium back to a usable (possibly empty) state.
    /// Returns whether anything was discarded.
    fn repair(&self) -> Result<bool> {
        Ok(false)
    }
}
