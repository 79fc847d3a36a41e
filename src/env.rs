//! Environment snapshots: the read-only key → value mapping a bind runs against.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use tracing::debug;

/// A read-only source of environment entries.
///
/// Lookups are exact-match; no case folding happens here or anywhere else in
/// the crate.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<&str>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }
}

/// An owned environment snapshot.
pub type Snapshot = HashMap<String, String>;

/// Build a snapshot from `(key, value)` pairs. Later duplicates win.
///
/// Takes an iterator so tests can pass synthetic data instead of the process
/// environment.
pub fn snapshot(vars: impl IntoIterator<Item = (String, String)>) -> Snapshot {
    vars.into_iter().collect()
}

/// Capture the current process environment.
///
/// Entries whose key or value is not valid UTF-8 are left out: they could
/// never match a schema key or coerce to a value.
pub fn capture() -> Snapshot {
    let snapshot: Snapshot = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    debug!(vars = snapshot.len(), "captured process environment");
    snapshot
}
