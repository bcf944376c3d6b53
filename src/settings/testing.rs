use std::{path::PathBuf, sync::Arc, time::Duration};

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::{
    navigation::{AppInfo, DeviceInfo, Destination},
    settings::{
        controller::SettingsController,
        grid::GridDefault,
        preferences::Preferences,
        store::{Pref, PreferenceStore},
        writer::PreferenceWriter,
    },
};

pub struct Harness {
    pub controller: Arc<SettingsController>,
    pub navigation: UnboundedReceiver<Destination>,
    _dir: tempfile::TempDir,
}

/// Controller over a fresh on-disk store, with its writer running on the test runtime.
pub fn harness(device_grid: bool) -> Harness {
    harness_with_grid(Arc::new(move || device_grid))
}

pub fn harness_with_grid(grid_default: Arc<dyn GridDefault>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    build(dir, path, grid_default)
}

/// Controller whose store lives in a directory that does not exist, so the first write
/// stops the writer.
pub fn harness_with_broken_store() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone").join("preferences.json");
    build(dir, path, Arc::new(|| true))
}

fn build(dir: tempfile::TempDir, path: PathBuf, grid_default: Arc<dyn GridDefault>) -> Harness {
    let store = Arc::new(PreferenceStore::open(path));
    let prefs = Arc::new(Preferences::new(store));
    let (writer, sender) = PreferenceWriter::new(prefs.clone(), grid_default.clone());
    tokio::spawn(writer.run());

    let (nav_tx, navigation) = unbounded_channel();
    let controller = SettingsController::new(
        prefs,
        sender,
        Arc::new(nav_tx),
        grid_default,
        AppInfo {
            version_name: "1.2.3".into(),
        },
        DeviceInfo {
            platform_version: "33".into(),
            model: "Pixel 7".into(),
        },
    );

    Harness {
        controller: Arc::new(controller),
        navigation,
        _dir: dir,
    }
}

/// Submit throwaway writes until the writer has given up on the store.
pub async fn wait_for_writer_to_stop(controller: &SettingsController) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while controller.set_seek_amount(1).is_ok() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("writer kept accepting commands");
}

/// Wait until the writer has stored a value matching `condition`.
pub async fn settle<T>(pref: &Pref<T>, condition: impl FnMut(&T) -> bool)
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let mut rx = pref.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(condition))
        .await
        .expect("preference never reached the expected value")
        .unwrap();
}
