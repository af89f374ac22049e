//! Flat key-value settings persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use oo_types::error::Result;

/// A primitive setting value.
///
/// Untagged so a TOML-backed store is a plain `key = value` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Str(String),
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for SettingValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f32> for SettingValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Abstraction over the platform's preference storage.
///
/// The typed getters fall back to `default` when the key is missing or
/// holds a value of another type.
pub trait SettingsStore {
    /// Raw lookup.
    fn get(&self, key: &str) -> Option<SettingValue>;

    /// Store a value. Last write wins.
    fn set(&mut self, key: &str, value: SettingValue);

    /// Push buffered writes to durable storage.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(SettingValue::Bool(v)) => v,
            other => fallback(key, other, default),
        }
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(SettingValue::Int(v)) => v,
            other => fallback(key, other, default),
        }
    }

    /// Integers are accepted where a float is expected.
    fn get_f32(&self, key: &str, default: f32) -> f32 {
        match self.get(key) {
            Some(SettingValue::Float(v)) => v,
            Some(SettingValue::Int(v)) => v as f32,
            other => fallback(key, other, default),
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(SettingValue::Str(v)) => v,
            other => fallback(key, other, default.to_string()),
        }
    }
}

fn fallback<T>(key: &str, found: Option<SettingValue>, default: T) -> T {
    if let Some(v) = found {
        log::warn!("setting {key:?} holds unexpected value {v:?}, using default");
    }
    default
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A settings store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, SettingValue>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }
}

// ---------------------------------------------------------------------------
// TOML file store
// ---------------------------------------------------------------------------

/// A settings store persisted as a flat TOML table.
///
/// Writes are buffered in memory; [`SettingsStore::flush`] rewrites the
/// whole file when anything changed.
#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
    dirty: bool,
}

impl TomlSettingsStore {
    /// Open the store at `path`. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, starting empty", path.display());
                BTreeMap::new()
            },
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    /// An empty store that will write to `path` on the next flush.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            values: BTreeMap::new(),
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl SettingsStore for TomlSettingsStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let text = toml::to_string(&self.values)?;
        std::fs::write(&self.path, text)?;
        self.dirty = false;
        log::debug!("settings flushed to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_return_stored_values() {
        let mut store = MemorySettingsStore::new();
        store.set("padding_dp", 12.5f32.into());
        store.set("is_interactable", false.into());
        store.set("animation_speed", 450u32.into());
        store.set("default_url", "https://example.com".into());
        assert_eq!(store.get_f32("padding_dp", 8.0), 12.5);
        assert!(!store.get_bool("is_interactable", true));
        assert_eq!(store.get_i64("animation_speed", 300), 450);
        assert_eq!(store.get_string("default_url", ""), "https://example.com");
    }

    #[test]
    fn missing_key_yields_default() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get_f32("padding_dp", 8.0), 8.0);
        assert!(store.get_bool("is_interactable", true));
        assert_eq!(store.get_string("last_url", "about:blank"), "about:blank");
    }

    #[test]
    fn type_mismatch_yields_default() {
        let mut store = MemorySettingsStore::new();
        store.set("animation_speed", "fast".into());
        store.set("is_desktop_mode", 1i64.into());
        assert_eq!(store.get_i64("animation_speed", 300), 300);
        assert!(!store.get_bool("is_desktop_mode", false));
    }

    #[test]
    fn int_accepted_as_float() {
        let mut store = MemorySettingsStore::new();
        store.set("corner_radius_dp", 16i64.into());
        assert_eq!(store.get_f32("corner_radius_dp", 24.0), 16.0);
    }

    #[test]
    fn toml_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::open(dir.path().join("prefs.toml")).unwrap();
        assert!(store.get("padding_dp").is_none());
        assert!(!store.is_dirty());
    }

    #[test]
    fn toml_store_flush_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let mut store = TomlSettingsStore::open(&path).unwrap();
        store.set("padding_dp", 8.1f32.into());
        store.set("single_line_height", 64u32.into());
        store.set("is_desktop_mode", true.into());
        store.set("last_url", "https://example.com/a?b=c".into());
        assert!(store.is_dirty());
        store.flush().unwrap();
        assert!(!store.is_dirty());

        let reopened = TomlSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get_f32("padding_dp", 0.0), 8.1);
        assert_eq!(reopened.get_i64("single_line_height", 0), 64);
        assert!(reopened.get_bool("is_desktop_mode", false));
        assert_eq!(
            reopened.get_string("last_url", ""),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn toml_store_unchanged_value_stays_clean() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlSettingsStore::empty(dir.path().join("prefs.toml"));
        store.set("is_interactable", true.into());
        store.flush().unwrap();
        store.set("is_interactable", true.into());
        assert!(!store.is_dirty());
    }

    #[test]
    fn toml_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "padding_dp = [[[").unwrap();
        assert!(TomlSettingsStore::open(&path).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_value() -> impl Strategy<Value = SettingValue> {
            prop_oneof![
                any::<bool>().prop_map(SettingValue::Bool),
                any::<i64>().prop_map(SettingValue::Int),
                (-1.0e6f32..1.0e6).prop_map(SettingValue::Float),
                "[a-zA-Z0-9 ._:/?=-]{0,24}".prop_map(SettingValue::Str),
            ]
        }

        proptest! {
            #[test]
            fn toml_store_keeps_each_value_kind(
                values in prop::collection::btree_map("[a-z_]{1,12}", arb_value(), 0..8),
            ) {
                let dir = tempfile::tempdir().unwrap();
                let path = dir.path().join("prefs.toml");
                let mut store = TomlSettingsStore::empty(&path);
                for (key, value) in &values {
                    store.set(key, value.clone());
                }
                store.flush().unwrap();

                let reopened = TomlSettingsStore::open(&path).unwrap();
                for (key, value) in &values {
                    let got = reopened.get(key);
                    prop_assert_eq!(got.as_ref(), Some(value));
                }
            }
        }
    }
}
