use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, instrument};
use crate::storage::KeyValueStore;
use crate::{ApiDesignerError, Result};

/// Stores every key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    directory: PathBuf,
}

impl JsonDirectoryStore {
    /// The directory is created on the first write, not here.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(ApiDesignerError::InvalidValue {
                kind: "store key",
                value: key.to_string(),
            });
        }

        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonDirectoryStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Nothing stored yet");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.directory)?;

        // Readers never see a half written file.
        let temp_path = self.directory.join(format!(".{key}.json.tmp"));
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}
