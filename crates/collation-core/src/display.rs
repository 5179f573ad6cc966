//! Human-readable projection of a record: field name to display string.
//!
//! Used for logging, debugging and JSON tooling. It is never hashed and is not
//! part of the wire contract.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::error::Result as CollationResult;

/// Ordered mapping of field names to display strings.
///
/// Entries keep the canonical field order, including through JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMap {
    entries: Vec<(String, String)>,
}

impl DisplayMap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: String) {
        self.entries.push((name.to_string(), value));
    }

    /// Look up the display string of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// JSON object in field order.
    pub fn to_json(&self) -> CollationResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DisplayMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for DisplayMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DisplayMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DisplayMapVisitor;

        impl<'de> Visitor<'de> for DisplayMapVisitor {
            type Value = DisplayMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DisplayMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    entries.push((k, v));
                }
                Ok(DisplayMap { entries })
            }
        }

        deserializer.deserialize_map(DisplayMapVisitor)
    }
}
