use crate::Result;

mod in_memory;
mod json_directory;
mod collections;
mod migration;

pub use in_memory::InMemoryStore;
pub use json_directory::JsonDirectoryStore;
pub use collections::*;

/// A flat key/value store holding one serialized collection per key.
///
/// Writes replace the whole value. There is no partial update and no coordination
/// between multiple writers, the last write wins.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when nothing has been stored under the key yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores the value, replacing whatever was stored under the key before.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
