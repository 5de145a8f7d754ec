//! Module exports container.

use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::LoaderError;

/// Exports of a single module.
///
/// Handed to the factory empty and populated in place, so a module caught in
/// a dependency cycle observes whatever has been set so far.
#[derive(Debug, Default)]
pub struct Exports {
    values: RwLock<Map<String, Value>>,
}

impl Exports {
    /// Create an empty exports container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an export, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value);
    }

    /// Get a copy of an export.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Decode an export into a typed value.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, LoaderError> {
        let value = self.get(key).ok_or_else(|| LoaderError::Export {
            key: key.to_owned(),
            message: "not exported".to_owned(),
        })?;
        serde_json::from_value(value).map_err(|e| LoaderError::Export {
            key: key.to_owned(),
            message: e.to_string(),
        })
    }

    /// Whether the export is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of exports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been exported yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all exports as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}
