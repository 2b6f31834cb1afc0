use std::path::Path;

use colored::Colorize;

pub fn show(save_dir: &Path, profile: &str) -> Result<(), String> {
    let store = super::open_store(save_dir, profile);
    let items = store.items();

    if items.is_empty() {
        println!("  No items saved for '{profile}'.");
        return Ok(());
    }

    println!("  {} ({})", "Inventory".bold(), profile);
    for item in items {
        println!("  - {item}");
    }

    Ok(())
}

pub fn clear(save_dir: &Path, profile: &str) -> Result<(), String> {
    let mut store = super::open_store(save_dir, profile);
    let count = store.items().len();
    store.clear();

    if store.backend().path().exists() {
        return Err(format!(
            "could not remove {}",
            store.backend().path().display()
        ));
    }
    println!("  Cleared {count} item(s) from '{profile}'.");

    Ok(())
}
