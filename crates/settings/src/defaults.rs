//! Declared defaults for settings keys.
//!
//! Responsibilities:
//! - Define the declaration table format: one `Declaration` per key, typed
//!   (text/int/bool/double) and optionally marked sensitive.
//! - Expose lookup operations used by the resolver: typed default fetch,
//!   sensitivity check, key enumeration.
//!
//! Does NOT handle:
//! - Deciding whether a missing declaration is fatal for a given call
//!   (the resolver propagates `MissingDefaultDeclaration` from the
//!   `_declared` accessor shapes; nothing here is ever swallowed).
//!
//! Invariants:
//! - Declaration tables are `'static` and immutable: built once when the
//!   owner type is defined, looked up, never mutated.
//! - Typed lookups require a declaration of the matching kind; a text
//!   declaration does not satisfy an int lookup.
//! - `is_sensitive` on an undeclared key is `false`.

use std::collections::BTreeMap;

use crate::error::SettingsError;

/// The typed default value carried by a declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeclaredValue {
    Text(&'static str),
    Int(i32),
    Bool(bool),
    Double(f64),
}

impl DeclaredValue {
    /// The default in string form, as it would appear in the property
    /// store.
    pub fn to_value_string(&self) -> String {
        match self {
            Self::Text(v) => (*v).to_string(),
            Self::Int(v) => v.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Double(v) => v.to_string(),
        }
    }
}

/// A registered default: a settings key, its typed default value, and
/// whether the key's value is sensitive.
#[derive(Debug, Clone, Copy)]
pub struct Declaration {
    pub key: &'static str,
    pub value: DeclaredValue,
    pub sensitive: bool,
}

impl Declaration {
    /// Declare a string default.
    pub const fn text(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: DeclaredValue::Text(value),
            sensitive: false,
        }
    }

    /// Declare an integer default.
    pub const fn int(key: &'static str, value: i32) -> Self {
        Self {
            key,
            value: DeclaredValue::Int(value),
            sensitive: false,
        }
    }

    /// Declare a boolean default.
    pub const fn bool(key: &'static str, value: bool) -> Self {
        Self {
            key,
            value: DeclaredValue::Bool(value),
            sensitive: false,
        }
    }

    /// Declare a double default.
    pub const fn double(key: &'static str, value: f64) -> Self {
        Self {
            key,
            value: DeclaredValue::Double(value),
            sensitive: false,
        }
    }

    /// Mark this key as sensitive: its resolved value is redacted from
    /// logs unless sensitive-data logging is enabled.
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// An owner type's statically built table of declared defaults.
///
/// Implement this on a marker type and pass that type to the `_declared`
/// accessor shapes (or bind it once with a
/// [`ConfigProvider`](crate::ConfigProvider)):
///
/// ```
/// use layered_settings::{Declaration, SettingDefaults};
///
/// struct DbDefaults;
///
/// impl SettingDefaults for DbDefaults {
///     const OWNER: &'static str = "DbDefaults";
///     const DECLARATIONS: &'static [Declaration] = &[
///         Declaration::text("host", "localhost"),
///         Declaration::int("port", 5432),
///         Declaration::text("password", "").sensitive(),
///     ];
/// }
///
/// assert_eq!(DbDefaults::default_int("port").unwrap(), 5432);
/// assert!(DbDefaults::is_sensitive("password"));
/// ```
pub trait SettingDefaults {
    /// Identifier used in error messages.
    const OWNER: &'static str;

    /// The declaration table, one entry per key.
    const DECLARATIONS: &'static [Declaration];

    /// Find the declaration for a key.
    fn declaration(key: &str) -> Option<&'static Declaration> {
        Self::DECLARATIONS.iter().find(|d| d.key == key)
    }

    /// Whether the key is declared sensitive. Undeclared keys are not.
    fn is_sensitive(key: &str) -> bool {
        Self::declaration(key).is_some_and(|d| d.sensitive)
    }

    /// The declared default for a key, in string form, whatever its kind.
    fn default_value(key: &str) -> Result<String, SettingsError> {
        Self::declaration(key)
            .map(|d| d.value.to_value_string())
            .ok_or_else(|| SettingsError::MissingDefaultDeclaration {
                owner: Self::OWNER,
                key: key.to_string(),
            })
    }

    /// The declared integer default for a key.
    fn default_int(key: &str) -> Result<i32, SettingsError> {
        match Self::declaration(key) {
            Some(Declaration {
                value: DeclaredValue::Int(v),
                ..
            }) => Ok(*v),
            _ => Err(SettingsError::MissingDefaultDeclaration {
                owner: Self::OWNER,
                key: key.to_string(),
            }),
        }
    }

    /// The declared boolean default for a key.
    fn default_bool(key: &str) -> Result<bool, SettingsError> {
        match Self::declaration(key) {
            Some(Declaration {
                value: DeclaredValue::Bool(v),
                ..
            }) => Ok(*v),
            _ => Err(SettingsError::MissingDefaultDeclaration {
                owner: Self::OWNER,
                key: key.to_string(),
            }),
        }
    }

    /// The declared double default for a key.
    fn default_double(key: &str) -> Result<f64, SettingsError> {
        match Self::declaration(key) {
            Some(Declaration {
                value: DeclaredValue::Double(v),
                ..
            }) => Ok(*v),
            _ => Err(SettingsError::MissingDefaultDeclaration {
                owner: Self::OWNER,
                key: key.to_string(),
            }),
        }
    }

    /// All declared keys.
    fn tags() -> impl Iterator<Item = &'static str> {
        Self::DECLARATIONS.iter().map(|d| d.key)
    }

    /// All declared keys with their defaults in string form.
    fn defaults() -> BTreeMap<&'static str, String> {
        Self::DECLARATIONS
            .iter()
            .map(|d| (d.key, d.value.to_value_string()))
            .collect()
    }
}
