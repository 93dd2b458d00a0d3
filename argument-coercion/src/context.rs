//! Request scoped data handed to every coercer.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;
use tower::BoxError;

use crate::Value;

/// Holds [`Context`] entries.
pub type Entries = Arc<DashMap<String, Value>>;

/// Request scoped entries shared by all the coercers of one field.
///
/// Cloning is cheap and clones share their entries, so a coercer can leave data for the
/// resolver, or read what an authentication step stored before coercion started.
#[derive(Clone, Debug, Default)]
pub struct Context {
    entries: Entries,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`, deserialized as `V`.
    pub fn get<K, V>(&self, key: K) -> Result<Option<V>, BoxError>
    where
        K: AsRef<str>,
        V: for<'de> Deserialize<'de>,
    {
        self.entries
            .get(key.as_ref())
            .map(|v| serde_json_bytes::from_value(v.value().clone()))
            .transpose()
            .map_err(|e| e.into())
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert<K, V>(&self, key: K, value: V) -> Result<Option<V>, BoxError>
    where
        K: Into<String>,
        V: for<'de> Deserialize<'de> + Serialize,
    {
        let value = serde_json_bytes::to_value(value)?;
        self.entries
            .insert(key.into(), value)
            .map(serde_json_bytes::from_value)
            .transpose()
            .map_err(|e| e.into())
    }

    /// Replace the value under `key` by `upsert(current)`, starting from `default()` if absent.
    ///
    /// The entry stays locked during the update, so concurrent coercers can use this as a counter.
    pub fn upsert<K, V>(
        &self,
        key: K,
        upsert: impl FnOnce(V) -> V,
        default: impl FnOnce() -> V,
    ) -> Result<(), BoxError>
    where
        K: Into<String>,
        V: for<'de> Deserialize<'de> + Serialize,
    {
        let mut entry = self
            .entries
            .entry(key.into())
            .or_try_insert_with(|| serde_json_bytes::to_value(default()))?;
        let current = serde_json_bytes::from_value(entry.value().clone())?;
        *entry.value_mut() = serde_json_bytes::to_value(upsert(current))?;
        Ok(())
    }

    /// Whether an entry exists under `key`.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.entries.contains_key(key.as_ref())
    }
}

/// Describes the field whose arguments are coerced.
///
/// Forwarded as is to every coercer so it can attribute its work to a field; the walker itself
/// never looks at it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Name of the type defining the field, like `Mutation`.
    pub parent_type: String,
    /// Name of the field, like `createBook`.
    pub field_name: String,
}

impl FieldInfo {
    /// Describe field `field_name` of type `parent_type`.
    pub fn new(parent_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            parent_type: parent_type.into(),
            field_name: field_name.into(),
        }
    }

    /// The schema coordinate of the field, like `Mutation.createBook`.
    pub fn coordinate(&self) -> String {
        format!("{}.{}", self.parent_type, self.field_name)
    }
}
