//! Centralized constants for the settings crate.

/// Placeholder logged in place of a sensitive value when sensitive-data
/// logging is disabled.
pub const REDACTED_VALUE: &str = "*****";

/// Separator used in environment variable names.
pub(crate) const ENV_SEPARATOR: char = '_';

/// Separator used in qualified setting keys.
pub(crate) const KEY_SEPARATOR: &str = ".";
