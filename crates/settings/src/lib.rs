//! Layered settings resolution.
//!
//! This crate resolves named settings from a layered source: a
//! caller-supplied property table overridden by a one-time snapshot of the
//! process environment, with per-key declared defaults and optional
//! memoization of resolved values.

mod cached;
mod constants;
mod defaults;
mod error;
mod provider;
mod resolver;
mod settings;
mod store;

pub use cached::CachedSettings;
pub use constants::REDACTED_VALUE;
pub use defaults::{Declaration, DeclaredValue, SettingDefaults};
pub use error::SettingsError;
pub use provider::ConfigProvider;
pub use resolver::Resolver;
pub use settings::Settings;
pub use store::{Properties, PropertyStore};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
