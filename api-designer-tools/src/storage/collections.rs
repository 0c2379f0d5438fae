use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use crate::models::{ApiInterface, DataSource, InterfaceCategory, Project};
use crate::storage::migration::upgrade_legacy_project;
use crate::storage::KeyValueStore;
use crate::{ApiDesignerError, Result};

pub const PROJECTS_KEY: &str = "api-designer-projects";
pub const DATA_SOURCES_KEY: &str = "api-designer-datasources";
pub const INTERFACES_KEY: &str = "api-designer-interfaces";
pub const CATEGORIES_KEY: &str = "api-designer-categories";

/// The version written by [save_collection]. Version 0 is a bare JSON array without an envelope.
pub const STORE_VERSION: u32 = 1;

/// An entity type that is stored as a collection under its own key.
pub trait StoredCollection: Serialize + DeserializeOwned {
    /// Rewrites an item stored by an older version into the current shape.
    fn upgrade(item: Value, _from_version: u32) -> Value {
        item
    }
}

impl StoredCollection for Project {
    fn upgrade(item: Value, from_version: u32) -> Value {
        if from_version == 0 {
            upgrade_legacy_project(item)
        } else {
            item
        }
    }
}

impl StoredCollection for DataSource {}

impl StoredCollection for ApiInterface {}

impl StoredCollection for InterfaceCategory {}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    items: Vec<Value>,
}

/// Parses a stored collection, upgrading items written by older versions.
pub fn parse_collection<T: StoredCollection>(key: &str, raw: &str) -> Result<Vec<T>> {
    let (version, items) = match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => (0, items),
        other => {
            let envelope: Envelope = serde_json::from_value(other)?;
            (envelope.version, envelope.items)
        }
    };

    if version > STORE_VERSION {
        return Err(ApiDesignerError::UnsupportedStoreVersion {
            key: key.to_string(),
            version,
            supported: STORE_VERSION,
        });
    }

    if version < STORE_VERSION {
        debug!(key, version, "Upgrading stored collection");
    }

    items
        .into_iter()
        .map(|item| {
            let item = if version < STORE_VERSION { T::upgrade(item, version) } else { item };
            serde_json::from_value(item).map_err(ApiDesignerError::from)
        })
        .collect()
}

/// Loads a collection, falling back to the seed when nothing is stored or the stored
/// value cannot be read.
#[instrument(skip(store, seed))]
pub fn load_collection<T, S, F>(store: &S, key: &str, seed: F) -> Vec<T>
where
    T: StoredCollection,
    S: KeyValueStore + ?Sized,
    F: FnOnce() -> Vec<T>,
{
    match store.get(key) {
        Ok(Some(raw)) => match parse_collection(key, &raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "Stored collection could not be parsed, using seed data");
                seed()
            }
        },
        Ok(None) => {
            debug!(key, "Nothing stored, using seed data");
            seed()
        }
        Err(e) => {
            warn!(key, error = %e, "Stored collection could not be read, using seed data");
            seed()
        }
    }
}

/// Writes the whole collection, replacing what was stored before.
#[instrument(skip(store, items), fields(count = items.len()))]
pub fn save_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> Result
where
    T: StoredCollection,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_string_pretty(&EnvelopeRef {
        version: STORE_VERSION,
        items,
    })?;

    store.set(key, &value)
}
