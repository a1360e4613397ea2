//! Key-value sources that fields are resolved against.
//!
//! A [`Provider`] answers a single question: what raw string, if any, is
//! stored under this key? `None` means "not supplied" and is the only signal
//! that makes a field fall through to its file field or default. An empty
//! string is a real value.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

/// Source of raw configuration strings.
pub trait Provider: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads values from the process environment.
///
/// Variables whose value is not valid Unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProvider;

impl Provider for EnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An in-memory provider, handy for tests and for snapshotting a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapProvider {
    values: BTreeMap<String, String>,
}

impl MapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any iterator of pairs, e.g. `std::env::vars()` or a literal slice.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl Provider for MapProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<S: BuildHasher + Send + Sync> Provider for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Provider for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<P: Provider + ?Sized> Provider for &P {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_provider_returns_values() {
        let provider = MapProvider::from_pairs([("DATABASE_HOST", "example.com")]);
        assert_eq!(provider.get("DATABASE_HOST").as_deref(), Some("example.com"));
        assert_eq!(provider.get("DATABASE_PORT"), None);
    }

    #[test]
    fn empty_string_is_present() {
        let provider = MapProvider::new().with("EMPTY", "");
        assert_eq!(provider.get("EMPTY").as_deref(), Some(""));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let provider = MapProvider::new().with("HOST", "x");
        assert_eq!(provider.get("host"), None);
    }

    #[test]
    fn hash_map_is_a_provider() {
        let mut map = HashMap::new();
        map.insert("KEY".to_string(), "v".to_string());
        assert_eq!(Provider::get(&map, "KEY").as_deref(), Some("v"));
    }

    #[test]
    fn boxed_and_shared_providers_delegate() {
        let boxed: Box<dyn Provider> = Box::new(MapProvider::new().with("A", "1"));
        assert_eq!(boxed.get("A").as_deref(), Some("1"));
        let shared: Arc<dyn Provider> = Arc::new(MapProvider::new().with("B", "2"));
        assert_eq!(shared.get("B").as_deref(), Some("2"));
    }

    #[test]
    fn env_provider_reads_process_env() {
        // PATH is set in every test environment we run under.
        assert!(EnvProvider.get("PATH").is_some());
        assert_eq!(EnvProvider.get("MINICFG_SURELY_UNSET_VARIABLE_123"), None);
    }
}
