//! The settings-resolution contract.
//!
//! Responsibilities:
//! - Define the accessor surface shared by the direct resolver and any
//!   decorator wrapping one (memoizing or otherwise).
//!
//! Does NOT handle:
//! - Resolution semantics (see settings.rs) or memoization (see cached.rs).
//!
//! Invariants:
//! - Each of the five value types comes in three shapes: bare (fails on a
//!   missing key), `_or` (inline default), and `_declared` (default from a
//!   `SettingDefaults` owner type).
//! - Bare shapes propagate `PropertyType` on a malformed stored value;
//!   `_or` and `_declared` shapes swallow it and fall back to the default.
//! - `_declared` shapes propagate `MissingDefaultDeclaration`; there is no
//!   further fallback.

use crate::defaults::SettingDefaults;
use crate::error::SettingsError;

/// Resolves logical setting names to typed values.
///
/// Implemented by the direct [`Settings`](crate::Settings) resolver and by
/// the memoizing [`CachedSettings`](crate::CachedSettings) decorator.
/// All methods take `&self`; implementations use interior mutability where
/// they keep state (the library is single-threaded by contract).
pub trait Resolver {
    /// True iff the property store has a value for the qualified name.
    fn contains(&self, name: &str) -> bool;

    /// Whether sensitive values are currently logged in full.
    fn log_sensitive_data(&self) -> bool;

    /// Change whether sensitive values are logged in full. Affects all
    /// subsequent lookups; not retroactive on anything already cached.
    fn set_log_sensitive_data(&self, value: bool);

    /// Write a string value at the qualified name.
    fn set(&self, name: &str, value: &str);

    /// Write a boolean value at the qualified name.
    fn set_bool(&self, name: &str, value: bool);

    fn get(&self, name: &str) -> Result<String, SettingsError>;
    fn get_sensitive(&self, name: &str) -> Result<String, SettingsError>;
    fn get_or(&self, name: &str, default: &str) -> String;
    fn get_sensitive_or(&self, name: &str, default: &str) -> String;
    fn get_declared<D: SettingDefaults>(&self, name: &str) -> Result<String, SettingsError>;

    fn get_int(&self, name: &str) -> Result<i32, SettingsError>;
    fn get_int_or(&self, name: &str, default: i32) -> i32;
    fn get_int_declared<D: SettingDefaults>(&self, name: &str) -> Result<i32, SettingsError>;

    fn get_long(&self, name: &str) -> Result<i64, SettingsError>;
    fn get_long_or(&self, name: &str, default: i64) -> i64;
    fn get_long_declared<D: SettingDefaults>(&self, name: &str) -> Result<i64, SettingsError>;

    fn get_double(&self, name: &str) -> Result<f64, SettingsError>;
    fn get_double_or(&self, name: &str, default: f64) -> f64;
    fn get_double_declared<D: SettingDefaults>(&self, name: &str) -> Result<f64, SettingsError>;

    fn get_bool(&self, name: &str) -> Result<bool, SettingsError>;
    fn get_bool_or(&self, name: &str, default: bool) -> bool;
    fn get_bool_declared<D: SettingDefaults>(&self, name: &str) -> Result<bool, SettingsError>;
}
