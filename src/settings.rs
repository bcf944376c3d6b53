pub mod controller;
pub mod errors;
pub mod grid;
pub mod preferences;
pub mod store;
#[cfg(test)]
pub mod testing;
pub mod time;
pub mod writer;

use std::{path::Path, sync::Arc};

use tracing::info;

use crate::settings::{
    grid::GridDefault,
    preferences::Preferences,
    store::PreferenceStore,
    writer::{PreferenceSender, PreferenceWriter},
};

/// Open the preferences in `data_dir` and start the writer on the shared runtime.
pub fn setup_preferences(
    data_dir: &Path,
    grid_default: Arc<dyn GridDefault>,
) -> (Arc<Preferences>, PreferenceSender) {
    let store = Arc::new(PreferenceStore::open(data_dir.join("preferences.json")));
    info!(path = %store.path().display(), "preferences loaded");
    let prefs = Arc::new(Preferences::new(store));

    let (writer, sender) = PreferenceWriter::new(prefs.clone(), grid_default);
    crate::RUNTIME.spawn(writer.run());

    (prefs, sender)
}
