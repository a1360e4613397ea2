//! Read-only access to populated values: key lookup, export and listing.
//!
//! Provides the logic behind reading a populated [`ConfigGroup`] as plain
//! values instead of [`Field`](crate::Field) wrappers, plus the
//! [`Listing`] type callers use to display everything at once.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::MinicfgError;
use crate::group::ConfigGroup;
use crate::types::ValueSource;
use crate::value::Value;

/// Plain-value view of a populated group. Obtained from
/// [`ConfigGroup::values`].
#[derive(Debug, Clone, Copy)]
pub struct Populated<'a> {
    group: &'a ConfigGroup,
}

impl<'a> Populated<'a> {
    pub(crate) fn new(group: &'a ConfigGroup) -> Self {
        Self { group }
    }

    /// Value of the field declared under `key` in this group.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.group.field(key)?.value()
    }

    /// Like [`get`](Self::get), but an undeclared key is an error.
    pub fn require(&self, key: &str) -> Result<&'a Value, MinicfgError> {
        self.get(key)
            .ok_or_else(|| MinicfgError::KeyNotFound(key.to_string()))
    }

    /// Where the value under `key` came from.
    pub fn source(&self, key: &str) -> Option<&'a ValueSource> {
        self.group.field(key)?.source()
    }

    /// View of the child group declared under `key`.
    pub fn group(&self, key: &str) -> Option<Populated<'a>> {
        self.group.child(key).map(Populated::new)
    }

    /// Navigate by dotted declared keys (e.g. `"Database.HOST"`).
    pub fn lookup(&self, dotted_key: &str) -> Option<&'a Value> {
        let (path, leaf) = match dotted_key.rsplit_once('.') {
            Some((p, l)) => (Some(p), l),
            None => (None, dotted_key),
        };

        let view = match path {
            Some(path) => {
                let mut current = *self;
                for segment in path.split('.') {
                    current = current.group(segment)?;
                }
                current
            }
            None => *self,
        };

        view.get(leaf)
    }

    /// Like [`lookup`](Self::lookup), but a missing path is an error.
    pub fn require_path(&self, dotted_key: &str) -> Result<&'a Value, MinicfgError> {
        self.lookup(dotted_key)
            .ok_or_else(|| MinicfgError::KeyNotFound(dotted_key.to_string()))
    }

    /// Export as a nested JSON object keyed by declared keys.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, field) in self.group.fields() {
            let value = field
                .value()
                .map(Value::to_json)
                .unwrap_or(serde_json::Value::Null);
            map.insert(key.to_string(), value);
        }
        for (key, child) in self.group.children() {
            map.insert(key.to_string(), Populated::new(child).to_json());
        }
        serde_json::Value::Object(map)
    }

    /// Deserialize the exported tree into a typed struct.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, MinicfgError> {
        serde_json::from_value(self.to_json()).map_err(MinicfgError::Extract)
    }

    /// Every field in the tree by final name, in declaration order.
    pub fn listing(&self) -> Listing {
        let mut entries = Vec::new();
        collect_entries(self.group, &mut entries);
        Listing { entries }
    }
}

fn collect_entries(group: &ConfigGroup, out: &mut Vec<(String, String)>) {
    for (key, field) in group.fields() {
        let name = field.name().unwrap_or(key).to_string();
        let display = match field.value() {
            Some(v) => v.to_string(),
            None => "<not set>".to_string(),
        };
        out.push((name, display));
    }
    for (_, child) in group.children() {
        collect_entries(child, out);
    }
}

/// Flattened `NAME = value` pairs of a populated tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<(String, String)>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}
