//! Memoizing decorator over a resolver.
//!
//! Responsibilities:
//! - Memoize resolved, coerced values per type family so repeated lookups
//!   of the same name skip re-resolution and repeated logging.
//!
//! Does NOT handle:
//! - Resolution itself (delegated to the wrapped resolver on a miss).
//! - Cache coherence: this is a memo, not a cache. External mutation of
//!   the backing store is invisible once a name has been memoized.
//!
//! Invariants:
//! - Five independent memo maps (string/int/long/bool/double); a name may
//!   be memoized under several coercions at once.
//! - Memo population is unconditional after every delegated resolution,
//!   including resolutions that fell back to a default.
//! - `set`/`set_bool` write only the corresponding memo map, not the
//!   store; `contains` delegates and so does not see memo-only writes.
//! - `get_int_or` additionally back-fills the string memo with the
//!   stringified integer; the other numeric `_or` shapes do not.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::defaults::SettingDefaults;
use crate::error::SettingsError;
use crate::resolver::Resolver;
use crate::settings::Settings;
use crate::store::Properties;

/// A memoizing wrapper around a resolver.
#[derive(Debug, Default)]
pub struct CachedSettings<R = Settings> {
    inner: R,
    strings: RefCell<HashMap<String, String>>,
    ints: RefCell<HashMap<String, i32>>,
    longs: RefCell<HashMap<String, i64>>,
    bools: RefCell<HashMap<String, bool>>,
    doubles: RefCell<HashMap<String, f64>>,
}

impl CachedSettings<Settings> {
    /// Cached settings containing only environment variables.
    pub fn from_environment() -> Self {
        Self::wrap(Settings::from_environment())
    }

    /// Cached settings over the given properties, overridden by
    /// environment variables, with no prefix.
    pub fn new(properties: Properties) -> Self {
        Self::wrap(Settings::new(properties))
    }

    /// Cached settings over the given properties and prefix; see
    /// [`Settings::with_options`].
    pub fn with_options(
        properties: Properties,
        prefix: &str,
        wrap_in_environment: bool,
        log_sensitive_data: bool,
    ) -> Self {
        Self::wrap(Settings::with_options(
            properties,
            prefix,
            wrap_in_environment,
            log_sensitive_data,
        ))
    }

    /// Create a sub-settings view of the wrapped settings, with a fresh
    /// (empty) memo.
    pub fn sub_settings(&self, prefix: &str) -> CachedSettings {
        self.inner.sub_settings(prefix)
    }
}

impl<R: Resolver> CachedSettings<R> {
    /// Decorate an existing resolver with a memo layer.
    pub fn wrap(inner: R) -> Self {
        Self {
            inner,
            strings: RefCell::new(HashMap::new()),
            ints: RefCell::new(HashMap::new()),
            longs: RefCell::new(HashMap::new()),
            bools: RefCell::new(HashMap::new()),
            doubles: RefCell::new(HashMap::new()),
        }
    }

    /// The wrapped resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn cached_string(&self, name: &str) -> Option<String> {
        self.strings.borrow().get(name).cloned()
    }

    fn memo_string(&self, name: &str, value: &str) {
        self.strings
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}

impl<R: Resolver> Resolver for CachedSettings<R> {
    fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    fn log_sensitive_data(&self) -> bool {
        self.inner.log_sensitive_data()
    }

    fn set_log_sensitive_data(&self, value: bool) {
        self.inner.set_log_sensitive_data(value);
    }

    fn set(&self, name: &str, value: &str) {
        self.memo_string(name, value);
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.bools.borrow_mut().insert(name.to_string(), value);
    }

    fn get(&self, name: &str) -> Result<String, SettingsError> {
        if let Some(value) = self.cached_string(name) {
            return Ok(value);
        }
        let value = self.inner.get(name)?;
        self.memo_string(name, &value);
        Ok(value)
    }

    fn get_sensitive(&self, name: &str) -> Result<String, SettingsError> {
        if let Some(value) = self.cached_string(name) {
            return Ok(value);
        }
        let value = self.inner.get_sensitive(name)?;
        self.memo_string(name, &value);
        Ok(value)
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        if let Some(value) = self.cached_string(name) {
            return value;
        }
        let value = self.inner.get_or(name, default);
        self.memo_string(name, &value);
        value
    }

    fn get_sensitive_or(&self, name: &str, default: &str) -> String {
        if let Some(value) = self.cached_string(name) {
            return value;
        }
        let value = self.inner.get_sensitive_or(name, default);
        self.memo_string(name, &value);
        value
    }

    fn get_declared<D: SettingDefaults>(&self, name: &str) -> Result<String, SettingsError> {
        if let Some(value) = self.cached_string(name) {
            return Ok(value);
        }
        let value = self.inner.get_declared::<D>(name)?;
        self.memo_string(name, &value);
        Ok(value)
    }

    fn get_int(&self, name: &str) -> Result<i32, SettingsError> {
        if let Some(value) = self.ints.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_int(name)?;
        self.ints.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_int_or(&self, name: &str, default: i32) -> i32 {
        if let Some(value) = self.ints.borrow().get(name) {
            return *value;
        }
        let value = self.inner.get_int_or(name, default);
        self.ints.borrow_mut().insert(name.to_string(), value);
        // Back-fill the string memo with the stringified integer.
        self.memo_string(name, &value.to_string());
        value
    }

    fn get_int_declared<D: SettingDefaults>(&self, name: &str) -> Result<i32, SettingsError> {
        if let Some(value) = self.ints.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_int_declared::<D>(name)?;
        self.ints.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_long(&self, name: &str) -> Result<i64, SettingsError> {
        if let Some(value) = self.longs.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_long(name)?;
        self.longs.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_long_or(&self, name: &str, default: i64) -> i64 {
        if let Some(value) = self.longs.borrow().get(name) {
            return *value;
        }
        let value = self.inner.get_long_or(name, default);
        self.longs.borrow_mut().insert(name.to_string(), value);
        value
    }

    fn get_long_declared<D: SettingDefaults>(&self, name: &str) -> Result<i64, SettingsError> {
        if let Some(value) = self.longs.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_long_declared::<D>(name)?;
        self.longs.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_double(&self, name: &str) -> Result<f64, SettingsError> {
        if let Some(value) = self.doubles.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_double(name)?;
        self.doubles.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_double_or(&self, name: &str, default: f64) -> f64 {
        if let Some(value) = self.doubles.borrow().get(name) {
            return *value;
        }
        let value = self.inner.get_double_or(name, default);
        self.doubles.borrow_mut().insert(name.to_string(), value);
        value
    }

    fn get_double_declared<D: SettingDefaults>(&self, name: &str) -> Result<f64, SettingsError> {
        if let Some(value) = self.doubles.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_double_declared::<D>(name)?;
        self.doubles.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_bool(&self, name: &str) -> Result<bool, SettingsError> {
        if let Some(value) = self.bools.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_bool(name)?;
        self.bools.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }

    fn get_bool_or(&self, name: &str, default: bool) -> bool {
        if let Some(value) = self.bools.borrow().get(name) {
            return *value;
        }
        let value = self.inner.get_bool_or(name, default);
        self.bools.borrow_mut().insert(name.to_string(), value);
        value
    }

    fn get_bool_declared<D: SettingDefaults>(&self, name: &str) -> Result<bool, SettingsError> {
        if let Some(value) = self.bools.borrow().get(name) {
            return Ok(*value);
        }
        let value = self.inner.get_bool_declared::<D>(name)?;
        self.bools.borrow_mut().insert(name.to_string(), value);
        Ok(value)
    }
}
