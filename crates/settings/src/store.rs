//! Layered property storage.
//!
//! Responsibilities:
//! - Hold the caller-supplied base table and the writable top layer.
//! - Take a one-time snapshot of the process environment at construction,
//!   translating variable names into key form.
//!
//! Does NOT handle:
//! - Key qualification or prefixing (see settings.rs).
//! - Type coercion or defaulting.
//!
//! Invariants:
//! - The top layer always wins over the base table on lookup.
//! - All writes go to the top layer; the base table is never mutated.
//! - The environment is read exactly once; later changes to the process
//!   environment are never observed.
//! - Environment names are translated `_` -> `.` and lowercased, inserted
//!   in sorted order of the original names so collisions after translation
//!   resolve deterministically.

use std::collections::BTreeMap;

use crate::constants::{ENV_SEPARATOR, KEY_SEPARATOR};

/// A table of fully-qualified setting keys to string values.
pub type Properties = BTreeMap<String, String>;

/// Two-layer property storage: a writable top layer over a supplied base
/// table. When environment wrapping is enabled the top layer is seeded
/// with a snapshot of the process environment.
#[derive(Debug, Default)]
pub struct PropertyStore {
    /// Writable layer; env snapshot lands here and wins on lookup.
    entries: Properties,
    /// Caller-supplied table, consulted when `entries` has no value.
    base: Properties,
}

/// Translate a requested name or environment variable name into key form:
/// underscores become the key-path separator. Callers may name settings in
/// either style.
pub(crate) fn translate_name(name: &str) -> String {
    name.replace(ENV_SEPARATOR, KEY_SEPARATOR)
}

/// Translate an environment variable name into key form. Names are also
/// lowercased so conventionally uppercase variables override dotted
/// lowercase keys.
fn env_name_to_key(name: &str) -> String {
    translate_name(name).to_ascii_lowercase()
}

impl PropertyStore {
    /// Create a store over the given base table, without an environment
    /// snapshot.
    pub fn new(base: Properties) -> Self {
        Self {
            entries: Properties::new(),
            base,
        }
    }

    /// Create a store over the given base table, seeding the top layer
    /// with a snapshot of the current process environment.
    pub fn with_environment(base: Properties) -> Self {
        let mut store = Self::new(base);
        // BTreeMap iteration gives the sorted-by-original-name order.
        let sorted_env: BTreeMap<String, String> = std::env::vars().collect();
        for (name, value) in sorted_env {
            let key = env_name_to_key(&name);
            tracing::debug!(key = %key, "Added environment variable");
            store.entries.insert(key, value);
        }
        store
    }

    /// Look up a qualified key, top layer first.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| self.base.get(key))
            .map(String::as_str)
    }

    /// Write a qualified key into the top layer, overwriting any previous
    /// value there and shadowing the base table.
    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    /// True iff the store holds a value for the qualified key.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
