//! The direct settings resolver.
//!
//! Responsibilities:
//! - Resolve a logical setting name to a typed value: prefix-qualify the
//!   name, apply precedence (stored value > inline default > declared
//!   default), coerce to the requested type.
//! - Emit one log record per successful resolution, redacting sensitive
//!   values unless sensitive-data logging is enabled.
//!
//! Does NOT handle:
//! - Memoization of resolved values (see cached.rs).
//! - Declaration tables themselves (see defaults.rs).
//!
//! Invariants:
//! - Bare accessors propagate `PropertyMissing`/`PropertyType`; `_or` and
//!   `_declared` accessors swallow coercion failures at `trace` severity
//!   and fall back to the default. This asymmetry is deliberate.
//! - `MissingDefaultDeclaration` from the `_declared` shapes is never
//!   swallowed; there is no further fallback.
//! - The sensitive-logging flag is per-instance and consulted at log time,
//!   so flipping it affects subsequent lookups only.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;

use crate::cached::CachedSettings;
use crate::constants::REDACTED_VALUE;
use crate::defaults::SettingDefaults;
use crate::error::SettingsError;
use crate::resolver::Resolver;
use crate::store::{Properties, PropertyStore, translate_name};

/// A settings holder: a shared property store, a key prefix, and the
/// sensitive-logging flag.
///
/// Sub-settings created with [`Settings::sub_settings`] share the same
/// store (they are views, not copies) and compose prefixes.
#[derive(Debug)]
pub struct Settings {
    properties: Rc<RefCell<PropertyStore>>,
    prefix: String,
    log_sensitive_data: Cell<bool>,
}

impl Settings {
    /// Create settings containing only environment variables.
    pub fn from_environment() -> Self {
        Self::with_options(Properties::new(), "", true, false)
    }

    /// Create settings over the given properties, overridden by
    /// environment variables, with no prefix.
    pub fn new(properties: Properties) -> Self {
        Self::with_options(properties, "", true, false)
    }

    /// Create settings over the given properties and prefix.
    ///
    /// `wrap_in_environment` controls whether a one-time snapshot of the
    /// process environment overrides the given properties.
    /// `log_sensitive_data` controls whether sensitive values are logged
    /// in full rather than redacted.
    pub fn with_options(
        properties: Properties,
        prefix: &str,
        wrap_in_environment: bool,
        log_sensitive_data: bool,
    ) -> Self {
        let store = if wrap_in_environment {
            PropertyStore::with_environment(properties)
        } else {
            PropertyStore::new(properties)
        };
        Self {
            properties: Rc::new(RefCell::new(store)),
            prefix: prefix.to_string(),
            log_sensitive_data: Cell::new(log_sensitive_data),
        }
    }

    pub(crate) fn view(
        properties: Rc<RefCell<PropertyStore>>,
        prefix: String,
        log_sensitive_data: bool,
    ) -> Self {
        Self {
            properties,
            prefix,
            log_sensitive_data: Cell::new(log_sensitive_data),
        }
    }

    /// The prefix prepended to every requested name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handle to the shared property store.
    pub fn properties(&self) -> Rc<RefCell<PropertyStore>> {
        Rc::clone(&self.properties)
    }

    /// Create a sub-settings view: same store, the given segment appended
    /// to this prefix, sensitive-logging flag inherited. Returned wrapped
    /// in a memoizing resolver.
    pub fn sub_settings(&self, prefix: &str) -> CachedSettings {
        CachedSettings::wrap(Settings::view(
            Rc::clone(&self.properties),
            format!("{}{}", self.prefix, prefix),
            self.log_sensitive_data.get(),
        ))
    }

    /// The key as looked up in the property store: prefix + translated
    /// name (`_` -> `.`).
    fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix, translate_name(name))
    }

    /// The name as it appears in log records: prefix + raw name.
    fn prefixed(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.properties
            .borrow()
            .get(&self.qualify(name))
            .map(str::to_string)
    }

    fn log_has_value(&self, name: &str, value: &str, sensitive: bool) {
        let shown = if !sensitive || self.log_sensitive_data.get() {
            value
        } else {
            REDACTED_VALUE
        };
        tracing::info!(key = %self.prefixed(name), value = %shown, "Setting has value");
    }

    fn log_default_value(&self, name: &str, default: &str, sensitive: bool) {
        let shown = if !sensitive || self.log_sensitive_data.get() {
            default
        } else {
            REDACTED_VALUE
        };
        tracing::info!(
            key = %self.prefixed(name),
            default = %shown,
            "Setting not set, using default value"
        );
    }

    /// Fetch the stored value for a name; `PropertyMissing` if absent.
    fn fetch(&self, name: &str, sensitive: bool) -> Result<String, SettingsError> {
        let key = self.qualify(name);
        let value = self.properties.borrow().get(&key).map(str::to_string);
        let Some(value) = value else {
            tracing::error!(key = %key, "Setting not set, and no default value");
            return Err(SettingsError::PropertyMissing { key });
        };
        self.log_has_value(name, &value, sensitive);
        Ok(value)
    }

    fn fetch_or(&self, name: &str, default: &str, sensitive: bool) -> String {
        match self.lookup(name) {
            Some(value) => {
                self.log_has_value(name, &value, sensitive);
                value
            }
            None => {
                self.log_default_value(name, default, sensitive);
                default.to_string()
            }
        }
    }

    /// Fetch and parse a stored numeric value. The value is logged before
    /// parsing, so a malformed value still produces its access record.
    fn fetch_parsed<T: FromStr>(
        &self,
        name: &str,
        sensitive: bool,
        target_type: &'static str,
    ) -> Result<T, SettingsError> {
        let value = self.fetch(name, sensitive)?;
        value.parse().map_err(|_| SettingsError::PropertyType {
            name: name.to_string(),
            target_type,
        })
    }

    /// Fetch and parse a stored boolean. Accepts `true`/`false` in any
    /// case; anything else is a type mismatch.
    fn fetch_bool(&self, name: &str, sensitive: bool) -> Result<bool, SettingsError> {
        let value = self.fetch(name, sensitive)?;
        match value.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(SettingsError::PropertyType {
                name: name.to_string(),
                target_type: "boolean",
            }),
        }
    }

    fn log_swallowed(error: &SettingsError) {
        tracing::trace!(error = %error, "Error getting settings value");
    }

    fn log_inline_default(&self, name: &str, default: &str) {
        tracing::info!(
            key = %self.prefixed(name),
            default = %default,
            "Setting not set, using default value"
        );
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_environment()
    }
}

impl Resolver for Settings {
    fn contains(&self, name: &str) -> bool {
        self.properties.borrow().contains(&self.qualify(name))
    }

    fn log_sensitive_data(&self) -> bool {
        self.log_sensitive_data.get()
    }

    fn set_log_sensitive_data(&self, value: bool) {
        self.log_sensitive_data.set(value);
    }

    fn set(&self, name: &str, value: &str) {
        self.properties
            .borrow_mut()
            .set(self.qualify(name), value.to_string());
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.set(name, &value.to_string());
    }

    fn get(&self, name: &str) -> Result<String, SettingsError> {
        self.fetch(name, false)
    }

    fn get_sensitive(&self, name: &str) -> Result<String, SettingsError> {
        self.fetch(name, true)
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        self.fetch_or(name, default, false)
    }

    fn get_sensitive_or(&self, name: &str, default: &str) -> String {
        self.fetch_or(name, default, true)
    }

    fn get_declared<D: SettingDefaults>(&self, name: &str) -> Result<String, SettingsError> {
        let sensitive = D::is_sensitive(name);
        match self.lookup(name) {
            Some(value) => {
                self.log_has_value(name, &value, sensitive);
                Ok(value)
            }
            None => {
                let default = D::default_value(name)?;
                self.log_default_value(name, &default, sensitive);
                Ok(default)
            }
        }
    }

    fn get_int(&self, name: &str) -> Result<i32, SettingsError> {
        self.fetch_parsed(name, false, "int")
    }

    fn get_int_or(&self, name: &str, default: i32) -> i32 {
        if self.contains(name) {
            match self.fetch_parsed::<i32>(name, false, "int") {
                Ok(value) => return value,
                Err(error) => Self::log_swallowed(&error),
            }
        }
        self.log_inline_default(name, &default.to_string());
        default
    }

    fn get_int_declared<D: SettingDefaults>(&self, name: &str) -> Result<i32, SettingsError> {
        let sensitive = D::is_sensitive(name);
        if self.contains(name) {
            match self.fetch_parsed::<i32>(name, sensitive, "int") {
                Ok(value) => return Ok(value),
                Err(error) => Self::log_swallowed(&error),
            }
        }
        let default = D::default_int(name)?;
        self.log_default_value(name, &default.to_string(), sensitive);
        Ok(default)
    }

    fn get_long(&self, name: &str) -> Result<i64, SettingsError> {
        self.fetch_parsed(name, false, "long")
    }

    fn get_long_or(&self, name: &str, default: i64) -> i64 {
        if self.contains(name) {
            match self.fetch_parsed::<i64>(name, false, "long") {
                Ok(value) => return value,
                Err(error) => Self::log_swallowed(&error),
            }
        }
        self.log_inline_default(name, &default.to_string());
        default
    }

    fn get_long_declared<D: SettingDefaults>(&self, name: &str) -> Result<i64, SettingsError> {
        let sensitive = D::is_sensitive(name);
        if self.contains(name) {
            match self.fetch_parsed::<i64>(name, sensitive, "long") {
                Ok(value) => return Ok(value),
                Err(error) => Self::log_swallowed(&error),
            }
        }
        // There is no long declaration kind; the int declaration is
        // widened, matching the declaration table format.
        let default = i64::from(D::default_int(name)?);
        self.log_default_value(name, &default.to_string(), sensitive);
        Ok(default)
    }

    fn get_double(&self, name: &str) -> Result<f64, SettingsError> {
        self.fetch_parsed(name, false, "double")
    }

    fn get_double_or(&self, name: &str, default: f64) -> f64 {
        if self.contains(name) {
            match self.fetch_parsed::<f64>(name, false, "double") {
                Ok(value) => return value,
                Err(error) => Self::log_swallowed(&error),
            }
        }
        self.log_inline_default(name, &default.to_string());
        default
    }

    fn get_double_declared<D: SettingDefaults>(&self, name: &str) -> Result<f64, SettingsError> {
        let sensitive = D::is_sensitive(name);
        if self.contains(name) {
            match self.fetch_parsed::<f64>(name, sensitive, "double") {
                Ok(value) => return Ok(value),
                Err(error) => Self::log_swallowed(&error),
            }
        }
        let default = D::default_double(name)?;
        self.log_default_value(name, &default.to_string(), sensitive);
        Ok(default)
    }

    fn get_bool(&self, name: &str) -> Result<bool, SettingsError> {
        self.fetch_bool(name, false)
    }

    fn get_bool_or(&self, name: &str, default: bool) -> bool {
        if self.contains(name) {
            match self.fetch_bool(name, false) {
                Ok(value) => return value,
                Err(error) => Self::log_swallowed(&error),
            }
        }
        self.log_inline_default(name, &default.to_string());
        default
    }

    fn get_bool_declared<D: SettingDefaults>(&self, name: &str) -> Result<bool, SettingsError> {
        let sensitive = D::is_sensitive(name);
        if self.contains(name) {
            match self.fetch_bool(name, sensitive) {
                Ok(value) => return Ok(value),
                Err(error) => Self::log_swallowed(&error),
            }
        }
        let default = D::default_bool(name)?;
        self.log_default_value(name, &default.to_string(), sensitive);
        Ok(default)
    }
}
