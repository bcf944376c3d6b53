use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::settings::errors::StoreError;

/// Key-value preferences persisted as a single JSON object.
///
/// Reads are served from memory. Writes replace the file atomically and only become visible
/// in memory once they have reached the disk.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
    write_lock: tokio::sync::Mutex<()>,
}

impl PreferenceStore {
    /// Load the store at `path`, starting empty if the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        debug!(path = %path.display(), keys = values.len(), "opened preference store");

        Self {
            path,
            values: Mutex::new(values),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn load(path: &Path) -> Map<String, Value> {
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(_) => return Map::new(), // first launch
        };

        match serde_json::from_reader(std::io::BufReader::new(file)) {
            Ok(Value::Object(values)) => values,
            Ok(_) => {
                warn!("preferences file is not a JSON object, using defaults");
                Map::new()
            }
            Err(e) => {
                warn!("could not read preferences, using defaults: {:?}", e);
                Map::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub async fn write(&self, key: &'static str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut next = self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        next.insert(key.to_owned(), value);

        let bytes = serde_json::to_vec_pretty(&next)
            .map_err(|source| StoreError::Serialize { key, source })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        *self.values.lock().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }
}

/// A single typed, named slot in a [`PreferenceStore`].
#[derive(Debug)]
pub struct Pref<T> {
    key: &'static str,
    store: Arc<PreferenceStore>,
    tx: watch::Sender<T>,
    lock: tokio::sync::Mutex<()>,
}

impl<T> Pref<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(store: Arc<PreferenceStore>, key: &'static str, default: T) -> Self {
        let initial = match store.read(key) {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("stored value for `{key}` is invalid, using default: {e}");
                default
            }),
            None => default,
        };

        let (tx, _) = watch::channel(initial);

        Self {
            key,
            store,
            tx,
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Read-modify-write of this slot. Concurrent updates of the same slot are applied one
    /// after another; subscribers are notified once the new value is on disk.
    pub async fn update(&self, transform: impl FnOnce(T) -> T) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;

        let next = transform(self.get());
        let value = serde_json::to_value(&next).map_err(|source| StoreError::Serialize {
            key: self.key,
            source,
        })?;
        self.store.write(self.key, value).await?;

        self.tx.send_replace(next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> Arc<PreferenceStore> {
        Arc::new(PreferenceStore::open(dir.path().join("preferences.json")))
    }

    #[tokio::test]
    async fn unset_slot_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let pref = Pref::new(store_in(&dir), "SEEK_TIME", 20);
        assert_eq!(pref.get(), 20);
    }

    #[tokio::test]
    async fn update_persists_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let pref = Pref::new(store.clone(), "darkTheme", false);
        let mut rx = pref.subscribe();

        assert!(pref.update(|dark| !dark).await.unwrap());
        rx.changed().await.unwrap();
        assert!(*rx.borrow());

        let reopened = PreferenceStore::open(store.path());
        assert_eq!(reopened.read("darkTheme"), Some(Value::Bool(true)));
    }

    #[tokio::test]
    async fn slots_do_not_clobber_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let seek = Pref::new(store.clone(), "SEEK_TIME", 0);
        let rewind = Pref::new(store.clone(), "AUTO_REWIND", 0);

        seek.update(|_| 30).await.unwrap();
        rewind.update(|_| 5).await.unwrap();

        let reopened = Arc::new(PreferenceStore::open(store.path()));
        assert_eq!(Pref::new(reopened.clone(), "SEEK_TIME", 0).get(), 30);
        assert_eq!(Pref::new(reopened, "AUTO_REWIND", 0).get(), 5);
    }

    #[tokio::test]
    async fn malformed_file_and_value_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        std::fs::write(&path, "{ not json").unwrap();
        let store = Arc::new(PreferenceStore::open(&path));
        assert_eq!(store.read("SEEK_TIME"), None);

        std::fs::write(&path, r#"{"SEEK_TIME": "ten"}"#).unwrap();
        let store = Arc::new(PreferenceStore::open(&path));
        assert_eq!(Pref::new(store, "SEEK_TIME", 10).get(), 10);
    }

    #[tokio::test]
    async fn failed_write_leaves_value_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(PreferenceStore::open(
            dir.path().join("missing").join("preferences.json"),
        ));
        let pref = Pref::new(store, "SEEK_TIME", 10);

        assert!(matches!(
            pref.update(|_| 99).await,
            Err(StoreError::Io(_))
        ));
        assert_eq!(pref.get(), 10);
    }
}
