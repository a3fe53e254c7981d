//! Shortlist demo entry point
//!
//! Walks a compare-list session against a file-backed store so the
//! persistence and notification paths can be watched with `RUST_LOG=debug`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::sync::Arc;

    use shortlist::{FileStorage, PreferenceStore, SelectionStore};

    env_logger::init();

    let dir = std::env::temp_dir().join("shortlist-demo");
    let backend = Arc::new(FileStorage::open(&dir).expect("failed to open file storage"));

    let prefs = PreferenceStore::open("prefs", backend.clone());
    println!("theme: {}", prefs.toggle_theme().as_str());

    let compare = SelectionStore::open_default("compare-list", backend).expect("failed to open store");
    compare.subscribe(|items| println!("compare list -> {items:?}"));

    log::info!(
        "store {:?} opened with {} of {} slot(s) used",
        compare.key(),
        compare.len(),
        compare.capacity()
    );

    compare.clear();
    for id in ["gpu-4080", "gpu-4090", "gpu-7900", "cpu-7800x3d"] {
        compare.add(id).expect("valid identifier");
    }

    // Full: this add is absorbed, so warn the way a UI would.
    compare.add("cpu-14700k").expect("valid identifier");
    if compare.is_full() {
        println!("compare list full ({} items max)", compare.capacity());
    }

    compare.remove("gpu-7900").expect("valid identifier");
    compare.add("cpu-14700k").expect("valid identifier");

    println!("final selection: {:?}", compare.list());
    println!("records in {}", dir.display());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm: the browser embedding drives the stores directly.
}
