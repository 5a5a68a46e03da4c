//! Binds a declaration owner type to a resolver.
//!
//! Responsibilities:
//! - Let call sites fetch declared-default settings without repeating the
//!   owner type on every call.
//!
//! Does NOT handle:
//! - Resolution or memoization (pure delegation to the wrapped resolver).

use std::marker::PhantomData;

use crate::cached::CachedSettings;
use crate::defaults::SettingDefaults;
use crate::error::SettingsError;
use crate::resolver::Resolver;
use crate::settings::Settings;

/// A resolver bound to a [`SettingDefaults`] owner type.
///
/// Every accessor delegates to the `_declared` shape with `D`, so missing
/// keys fall back to `D`'s declarations and sensitivity flags.
#[derive(Debug)]
pub struct ConfigProvider<D: SettingDefaults, R: Resolver = CachedSettings> {
    settings: R,
    _defaults: PhantomData<D>,
}

impl<D: SettingDefaults, R: Resolver> ConfigProvider<D, R> {
    /// Bind the owner type `D` to the given resolver.
    pub fn new(settings: R) -> Self {
        Self {
            settings,
            _defaults: PhantomData,
        }
    }

    /// The underlying resolver.
    pub fn settings(&self) -> &R {
        &self.settings
    }

    pub fn get(&self, name: &str) -> Result<String, SettingsError> {
        self.settings.get_declared::<D>(name)
    }

    pub fn get_int(&self, name: &str) -> Result<i32, SettingsError> {
        self.settings.get_int_declared::<D>(name)
    }

    pub fn get_long(&self, name: &str) -> Result<i64, SettingsError> {
        self.settings.get_long_declared::<D>(name)
    }

    pub fn get_double(&self, name: &str) -> Result<f64, SettingsError> {
        self.settings.get_double_declared::<D>(name)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, SettingsError> {
        self.settings.get_bool_declared::<D>(name)
    }
}

impl<D: SettingDefaults> ConfigProvider<D, CachedSettings<Settings>> {
    /// Create a sub-settings view of the bound settings.
    pub fn sub_settings(&self, prefix: &str) -> CachedSettings {
        self.settings.sub_settings(prefix)
    }
}
