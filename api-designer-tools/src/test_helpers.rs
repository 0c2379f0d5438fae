use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A helper for tests that need a store directory on disk.
///
/// Every instance gets its own directory under the system temp directory. The directory
/// is removed when the helper is dropped, unless the test is panicking, in which case it
/// is left around to be inspected.
pub struct TempStoreDir {
    path: PathBuf,
}

impl TempStoreDir {
    pub fn new(name: &str) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        let path = std::env::temp_dir().join(format!("api_designer_test_{name}_{id}"));

        TempStoreDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempStoreDir {
    fn drop(&mut self) {
        if std::thread::panicking() {
            eprintln!("Thread is panicking when dropping temp store. Leaving '{}' around to be inspected", self.path.display());
            return;
        }

        if self.path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                eprintln!("Failed to clean up temp store '{}': {e}", self.path.display());
            }
        }
    }
}
