//! Integration tests for the memoizing decorator: idempotence, memo-only
//! writes, the string back-fill on `get_int_or`, and the deliberate lack
//! of coherence with later store mutation.

use std::cell::Cell;

use layered_settings::{
    CachedSettings, Declaration, Properties, Resolver, SettingDefaults, Settings, SettingsError,
};

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

struct CacheDefaults;

impl SettingDefaults for CacheDefaults {
    const OWNER: &'static str = "CacheDefaults";
    const DECLARATIONS: &'static [Declaration] = &[
        Declaration::text("host", "localhost"),
        Declaration::int("port", 9000),
    ];
}

/// Call-counting collaborator: delegates to a direct resolver and counts
/// every resolution reaching it, so tests can observe whether a memoized
/// call consulted the store at all.
struct CountingResolver {
    inner: Settings,
    resolutions: Cell<usize>,
}

impl CountingResolver {
    fn new(inner: Settings) -> Self {
        Self {
            inner,
            resolutions: Cell::new(0),
        }
    }

    fn count(&self) -> usize {
        self.resolutions.get()
    }

    fn tick(&self) {
        self.resolutions.set(self.resolutions.get() + 1);
    }
}

impl Resolver for CountingResolver {
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
        self.inner.set(name, value);
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.inner.set_bool(name, value);
    }

    fn get(&self, name: &str) -> Result<String, SettingsError> {
        self.tick();
        self.inner.get(name)
    }

    fn get_sensitive(&self, name: &str) -> Result<String, SettingsError> {
        self.tick();
        self.inner.get_sensitive(name)
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        self.tick();
        self.inner.get_or(name, default)
    }

    fn get_sensitive_or(&self, name: &str, default: &str) -> String {
        self.tick();
        self.inner.get_sensitive_or(name, default)
    }

    fn get_declared<D: SettingDefaults>(&self, name: &str) -> Result<String, SettingsError> {
        self.tick();
        self.inner.get_declared::<D>(name)
    }

    fn get_int(&self, name: &str) -> Result<i32, SettingsError> {
        self.tick();
        self.inner.get_int(name)
    }

    fn get_int_or(&self, name: &str, default: i32) -> i32 {
        self.tick();
        self.inner.get_int_or(name, default)
    }

    fn get_int_declared<D: SettingDefaults>(&self, name: &str) -> Result<i32, SettingsError> {
        self.tick();
        self.inner.get_int_declared::<D>(name)
    }

    fn get_long(&self, name: &str) -> Result<i64, SettingsError> {
        self.tick();
        self.inner.get_long(name)
    }

    fn get_long_or(&self, name: &str, default: i64) -> i64 {
        self.tick();
        self.inner.get_long_or(name, default)
    }

    fn get_long_declared<D: SettingDefaults>(&self, name: &str) -> Result<i64, SettingsError> {
        self.tick();
        self.inner.get_long_declared::<D>(name)
    }

    fn get_double(&self, name: &str) -> Result<f64, SettingsError> {
        self.tick();
        self.inner.get_double(name)
    }

    fn get_double_or(&self, name: &str, default: f64) -> f64 {
        self.tick();
        self.inner.get_double_or(name, default)
    }

    fn get_double_declared<D: SettingDefaults>(&self, name: &str) -> Result<f64, SettingsError> {
        self.tick();
        self.inner.get_double_declared::<D>(name)
    }

    fn get_bool(&self, name: &str) -> Result<bool, SettingsError> {
        self.tick();
        self.inner.get_bool(name)
    }

    fn get_bool_or(&self, name: &str, default: bool) -> bool {
        self.tick();
        self.inner.get_bool_or(name, default)
    }

    fn get_bool_declared<D: SettingDefaults>(&self, name: &str) -> Result<bool, SettingsError> {
        self.tick();
        self.inner.get_bool_declared::<D>(name)
    }
}

fn counting(pairs: &[(&str, &str)]) -> CachedSettings<CountingResolver> {
    CachedSettings::wrap(CountingResolver::new(Settings::with_options(
        props(pairs),
        "",
        false,
        false,
    )))
}

#[test]
fn test_second_declared_lookup_hits_memo_not_resolver() {
    let cached = counting(&[]);

    let first = cached.get_declared::<CacheDefaults>("host").unwrap();
    let second = cached.get_declared::<CacheDefaults>("host").unwrap();

    assert_eq!(first, "localhost");
    assert_eq!(first, second);
    assert_eq!(cached.inner().count(), 1, "second call must not delegate");
}

#[test]
fn test_fallback_defaults_are_memoized_too() {
    let cached = counting(&[]);

    assert_eq!(cached.get_int_declared::<CacheDefaults>("port").unwrap(), 9000);
    assert_eq!(cached.get_int_declared::<CacheDefaults>("port").unwrap(), 9000);
    assert_eq!(cached.inner().count(), 1);

    assert_eq!(cached.get_or("absent", "d"), "d");
    assert_eq!(cached.get_or("absent", "other"), "d", "memoized default wins");
    assert_eq!(cached.inner().count(), 2);
}

#[test]
fn test_failed_resolution_is_not_memoized() {
    let cached = counting(&[]);

    assert!(cached.get("absent").is_err());
    assert!(cached.get("absent").is_err());
    assert_eq!(cached.inner().count(), 2, "errors must not populate the memo");
}

#[test]
fn test_memo_does_not_observe_later_store_mutation() {
    let cached = CachedSettings::with_options(props(&[("k", "v1")]), "", false, false);

    assert_eq!(cached.get("k").unwrap(), "v1");
    cached.inner().set("k", "v2");
    assert_eq!(cached.get("k").unwrap(), "v1", "memo is not invalidated");

    // A name not yet memoized sees the mutation.
    cached.inner().set("fresh", "new");
    assert_eq!(cached.get("fresh").unwrap(), "new");
}

#[test]
fn test_set_writes_memo_only() {
    let cached = counting(&[]);

    cached.set("k", "v");
    assert_eq!(cached.get("k").unwrap(), "v");
    assert_eq!(cached.inner().count(), 0, "memoized set never delegates");

    // The store never saw the write, so contains (which delegates) is false.
    assert!(!cached.contains("k"));
}

#[test]
fn test_set_bool_writes_bool_memo_only() {
    let cached = counting(&[]);

    cached.set_bool("flag", true);
    assert!(cached.get_bool("flag").unwrap());
    assert_eq!(cached.inner().count(), 0);

    // The string family is independent; a string get still delegates.
    assert!(cached.get("flag").is_err());
    assert_eq!(cached.inner().count(), 1);
}

#[test]
fn test_get_int_or_backfills_string_memo() {
    let cached = counting(&[]);

    assert_eq!(cached.get_int_or("size", 7), 7);
    assert_eq!(cached.inner().count(), 1);

    // The stringified integer is now served from the string memo.
    assert_eq!(cached.get("size").unwrap(), "7");
    assert_eq!(cached.inner().count(), 1);
}

#[test]
fn test_other_numeric_or_shapes_do_not_backfill() {
    let cached = counting(&[]);

    assert_eq!(cached.get_long_or("size", 7), 7);
    assert_eq!(cached.get_double_or("ratio", 0.5), 0.5);
    assert_eq!(cached.inner().count(), 2);

    // No string memo entries: string gets delegate (and fail, nothing stored).
    assert!(cached.get("size").is_err());
    assert!(cached.get("ratio").is_err());
    assert_eq!(cached.inner().count(), 4);
}

#[test]
fn test_type_families_are_independent() {
    let cached = CachedSettings::with_options(props(&[("n", "1")]), "", false, false);

    assert_eq!(cached.get_int("n").unwrap(), 1);
    assert_eq!(cached.get_long("n").unwrap(), 1i64);
    assert_eq!(cached.get_double("n").unwrap(), 1.0);
    assert_eq!(cached.get("n").unwrap(), "1");

    // Mutating the store shows none of the memoized families move.
    cached.inner().set("n", "2");
    assert_eq!(cached.get_int("n").unwrap(), 1);
    assert_eq!(cached.get("n").unwrap(), "1");
}

#[test]
fn test_sub_settings_get_fresh_memo() {
    let cached = CachedSettings::with_options(props(&[("svc.k", "v1")]), "svc.", false, false);
    assert_eq!(cached.sub_settings("").get("k").unwrap(), "v1");

    cached.inner().set("k", "v2");
    // A newly created sub-settings has no memo and sees the new value.
    assert_eq!(cached.sub_settings("").get("k").unwrap(), "v2");
}
