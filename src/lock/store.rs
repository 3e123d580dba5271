use crate::core::{
    constants::{KEY_LAT, KEY_LNG, KEY_ZOOM},
    geo::LatLng,
    viewport::Viewport,
};
use crate::{MapError, Result};
use fxhash::FxHashMap as HashMap;

/// String-valued key-value storage supplied by the host platform.
///
/// Implementations wrap whatever the host offers (browser local storage, a
/// settings file, ...). Operations are synchronous and last-write-wins; the
/// engine is single-threaded so no locking is needed.
pub trait KeyValueStorage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory storage for tests and headless hosts
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Persists and restores the locked viewport as three scalar entries.
///
/// Values are JSON-encoded numbers under the keys `lat`, `lng`, `zoom`.
/// Presence of the `lat` entry alone is the lock-state discriminant; the
/// other two are assumed consistent with it. A missing or unparsable entry
/// makes `load` report absent rather than fail.
pub struct ViewportStore {
    storage: Box<dyn KeyValueStorage>,
}

impl ViewportStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Write the viewport's three scalar entries
    pub fn save(&mut self, viewport: &Viewport) -> Result<()> {
        if !viewport.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "({}, {})",
                viewport.center.lat, viewport.center.lng
            ))
            .into());
        }
        self.storage
            .set(KEY_LAT, &serde_json::to_string(&viewport.center.lat)?);
        self.storage
            .set(KEY_LNG, &serde_json::to_string(&viewport.center.lng)?);
        self.storage
            .set(KEY_ZOOM, &serde_json::to_string(&viewport.zoom)?);
        Ok(())
    }

    /// Read and reconstruct the persisted viewport, if any
    pub fn load(&self) -> Option<Viewport> {
        let lat: f64 = serde_json::from_str(&self.storage.get(KEY_LAT)?).ok()?;
        let lng: f64 = serde_json::from_str(&self.storage.get(KEY_LNG)?).ok()?;
        let zoom: u8 = serde_json::from_str(&self.storage.get(KEY_ZOOM)?).ok()?;

        let center = LatLng::new(lat, lng);
        if !center.is_valid() {
            return None;
        }
        Some(Viewport::new(center, zoom))
    }

    /// Remove all three entries
    pub fn clear(&mut self) {
        self.storage.remove(KEY_LAT);
        self.storage.remove(KEY_LNG);
        self.storage.remove(KEY_ZOOM);
    }

    /// True iff the `lat` entry exists
    pub fn is_present(&self) -> bool {
        self.storage.get(KEY_LAT).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ViewportStore {
        ViewportStore::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_round_trip() {
        let mut store = store();
        let viewport = Viewport::new(LatLng::new(40.0, -98.0), 5);

        store.save(&viewport).unwrap();
        assert!(store.is_present());
        assert_eq!(store.load(), Some(viewport));
    }

    #[test]
    fn test_clear_makes_absent() {
        let mut store = store();
        store
            .save(&Viewport::new(LatLng::new(51.5, -0.1), 12))
            .unwrap();

        store.clear();
        assert!(!store.is_present());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_missing_entry_reports_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY_LAT, "40.0");
        storage.set(KEY_LNG, "-98.0");
        // zoom entry missing

        let store = ViewportStore::new(Box::new(storage));
        assert!(store.is_present());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_malformed_entry_reports_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY_LAT, "not-a-number");
        storage.set(KEY_LNG, "-98.0");
        storage.set(KEY_ZOOM, "5");

        let store = ViewportStore::new(Box::new(storage));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_out_of_range_center_reports_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY_LAT, "95.0");
        storage.set(KEY_LNG, "-98.0");
        storage.set(KEY_ZOOM, "5");

        let store = ViewportStore::new(Box::new(storage));
        assert_eq!(store.load(), None);
    }
}
