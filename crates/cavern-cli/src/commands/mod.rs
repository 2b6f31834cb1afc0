pub mod check;
pub mod export;
pub mod inventory;
pub mod play;
pub mod scenes;
pub mod walk;

use std::path::Path;

use cavern_core::{FileBackend, InventoryStore, SceneGraph, cave_story};

/// Load a story file, or the built-in story when no path is given.
fn load_story(path: Option<&Path>) -> Result<SceneGraph, String> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            SceneGraph::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => cave_story().map_err(|e| format!("built-in story is broken: {e}")),
    }
}

/// Open the file-backed inventory for a profile.
fn open_store(save_dir: &Path, profile: &str) -> InventoryStore<FileBackend> {
    InventoryStore::open(FileBackend::new(save_dir, profile))
}

/// Build a single-threaded runtime for the async engine.
fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))
}

/// Short label for the place a scene leads to.
fn describe_targets(targets: &[&str]) -> String {
    if targets.is_empty() {
        "—".to_string()
    } else {
        targets.join(", ")
    }
}
