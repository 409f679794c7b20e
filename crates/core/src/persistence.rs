//! Saving and restoring the last Celsius reading
//!
//! The host calls [`load_model`] when the screen is created and
//! [`save_model`] when it is hidden. Storage goes through the
//! [`PreferenceStore`] trait so the host can plug in whatever key-value
//! store its platform offers.

use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core_types::{Celsius, TemperatureReading};
use crate::model::TemperatureModel;

/// Key the Celsius reading is stored under
pub const CELSIUS_KEY: &str = "celsius";

/// Minimal key-value store holding floating-point preferences
pub trait PreferenceStore {
    /// Read a value. `Ok(None)` means the key was never written.
    ///
    /// # Errors
    /// Returns error if the backing store cannot be read
    fn get_f64(&self, key: &str) -> Result<Option<f64>, PersistenceError>;

    /// Stage a value. It is not durable until [`PreferenceStore::commit`].
    ///
    /// # Errors
    /// Returns error if the store cannot hold the value
    fn put_f64(&mut self, key: &str, value: f64) -> Result<(), PersistenceError>;

    /// Make staged values durable.
    ///
    /// # Errors
    /// Returns error if the backing store cannot be written
    fn commit(&mut self) -> Result<(), PersistenceError>;
}

/// Build a model from the stored Celsius reading, or 0 °C if none was saved.
///
/// # Errors
/// Returns error if the store cannot be read
pub fn load_model(store: &impl PreferenceStore) -> Result<TemperatureModel, PersistenceError> {
    let celsius = store.get_f64(CELSIUS_KEY)?.unwrap_or(0.0);
    debug!(celsius, "Restored temperature preference");
    Ok(TemperatureModel::new(Celsius::new(celsius)))
}

/// Store the model's current Celsius reading and commit.
///
/// # Errors
/// Returns error if the value cannot be staged or committed
pub fn save_model(
    model: &TemperatureModel,
    store: &mut impl PreferenceStore,
) -> Result<(), PersistenceError> {
    save_reading(&model.reading(), store)
}

/// Store the Celsius value of `reading` and commit. For hosts that only hold
/// a copy of the reading, such as a change callback.
///
/// # Errors
/// Returns error if the value cannot be staged or committed
pub fn save_reading(
    reading: &TemperatureReading,
    store: &mut impl PreferenceStore,
) -> Result<(), PersistenceError> {
    let celsius = *reading.celsius();
    store.put_f64(CELSIUS_KEY, celsius)?;
    store.commit()?;
    debug!(celsius, "Saved temperature preference");
    Ok(())
}

/// In-memory store, for tests and hosts that persist elsewhere
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: FxHashMap<String, f64>,
    commits: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `commit` has been called
    pub fn commit_count(&self) -> usize {
        self.commits
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_f64(&self, key: &str) -> Result<Option<f64>, PersistenceError> {
        Ok(self.values.get(key).copied())
    }

    fn put_f64(&mut self, key: &str, value: f64) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        self.commits += 1;
        Ok(())
    }
}

/// Preferences kept as a flat JSON object on disk.
///
/// A missing file reads as an empty store. Values are staged in memory and
/// written as a whole on [`PreferenceStore::commit`].
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: FxHashMap<String, f64>,
}

impl JsonFilePreferences {
    /// Open the preference file at `path`.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| PersistenceError::ParseFailed(e.to_string()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No preference file yet");
                FxHashMap::default()
            }
            Err(e) => return Err(PersistenceError::LoadFailed(e.to_string())),
        };
        Ok(Self { path, values })
    }

    /// An empty store that will write to `path` on commit, replacing
    /// whatever is there. Use it to recover from a file `open` rejected.
    pub fn empty<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            values: FxHashMap::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get_f64(&self, key: &str) -> Result<Option<f64>, PersistenceError> {
        Ok(self.values.get(key).copied())
    }

    fn put_f64(&mut self, key: &str, value: f64) -> Result<(), PersistenceError> {
        // JSON has no NaN or infinity
        if !value.is_finite() {
            return Err(PersistenceError::NonFiniteValue {
                key: key.to_string(),
                value,
            });
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string_pretty(&self.values)
            .map_err(|e| PersistenceError::SerializeFailed(e.to_string()))?;

        fs::write(&self.path, contents).map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;

        Ok(())
    }
}

/// Errors that can occur with persistence operations
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// Failed to load file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to serialize preferences
    SerializeFailed(String),
    /// Failed to save file
    SaveFailed(String),
    /// Value cannot be represented by the store
    NonFiniteValue { key: String, value: f64 },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            PersistenceError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            PersistenceError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            PersistenceError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
            PersistenceError::NonFiniteValue { key, value } => {
                write!(f, "Cannot store non-finite value {value} under '{key}'")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "temp_converter_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_load_defaults_to_freezing() {
        let store = MemoryPreferences::new();
        let model = load_model(&store).unwrap();
        assert_eq!(model.celsius(), 0.0);
        assert_eq!(model.fahrenheit(), 32.0);
    }

    #[test]
    fn test_save_then_load_memory() {
        let mut store = MemoryPreferences::new();
        let mut model = TemperatureModel::default();
        model.set_fahrenheit(98.6);

        save_model(&model, &mut store).unwrap();
        assert_eq!(store.commit_count(), 1);

        let restored = load_model(&store).unwrap();
        assert!((restored.celsius() - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let store = JsonFilePreferences::open(&path).unwrap();
        assert_eq!(store.get_f64(CELSIUS_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("roundtrip");
        let mut model = TemperatureModel::default();
        model.set_kelvin(300.0);

        let mut store = JsonFilePreferences::open(&path).unwrap();
        save_model(&model, &mut store).unwrap();

        let reopened = JsonFilePreferences::open(&path).unwrap();
        let restored = load_model(&reopened).unwrap();
        assert!((restored.kelvin() - 300.0).abs() < 1e-9);

        // Cleanup
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFilePreferences::open(&path);
        assert!(matches!(result, Err(PersistenceError::ParseFailed(_))));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_store_overwrites_corrupt_file() {
        let path = temp_path("heal");
        fs::write(&path, "[1, 2").unwrap();
        assert!(JsonFilePreferences::open(&path).is_err());

        let mut store = JsonFilePreferences::empty(&path);
        assert_eq!(store.get_f64(CELSIUS_KEY).unwrap(), None);
        let mut model = TemperatureModel::default();
        model.set_celsius(-12.5);
        save_model(&model, &mut store).unwrap();

        let reopened = JsonFilePreferences::open(&path).unwrap();
        assert_eq!(reopened.get_f64(CELSIUS_KEY).unwrap(), Some(-12.5));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_reading_stores_celsius() {
        let mut store = MemoryPreferences::new();
        let reading = TemperatureReading::from_scale(crate::Scale::Kelvin, 373.15);

        save_reading(&reading, &mut store).unwrap();
        let stored = store.get_f64(CELSIUS_KEY).unwrap().unwrap();
        assert!((stored - 100.0).abs() < 1e-9);
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_non_finite_rejected() {
        let path = temp_path("nan");
        let mut store = JsonFilePreferences::open(&path).unwrap();
        let err = store.put_f64(CELSIUS_KEY, f64::NAN).unwrap_err();
        assert!(matches!(err, PersistenceError::NonFiniteValue { .. }));
        assert_eq!(store.get_f64(CELSIUS_KEY).unwrap(), None);
    }
}
