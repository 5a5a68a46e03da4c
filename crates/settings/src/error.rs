//! Error types for settings resolution.
//!
//! Responsibilities:
//! - Define error variants for all resolution failures.
//!
//! Does NOT handle:
//! - Deciding whether a failure is swallowed into a default value (that is
//!   the resolver's call; see settings.rs).
//!
//! Invariants:
//! - All variants include context for debugging (key names, target types,
//!   owner identifiers).
//! - `PropertyMissing` and `MissingDefaultDeclaration` are always
//!   propagated to the caller; `PropertyType` is propagated only from the
//!   bare single-argument accessors.

use thiserror::Error;

/// Errors that can occur while resolving a setting.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The qualified key has no stored value and no default of any kind.
    #[error("Setting '{key}' is not set and has no default value")]
    PropertyMissing { key: String },

    /// The stored value could not be parsed as the requested type.
    #[error("Invalid value for '{name}': not a valid {target_type}")]
    PropertyType {
        name: String,
        target_type: &'static str,
    },

    /// An owner-type accessor asked for a key with no matching declaration.
    #[error("{owner} has no declared default for '{key}'")]
    MissingDefaultDeclaration { owner: &'static str, key: String },
}
