//! Integration tests for configuration-driven store access

use serde_json::json;
use statestore::{Category, StoreConfig};
use tempfile::TempDir;

/// A config file pointing at a states directory wires through to open/save.
#[test]
fn test_config_file_drives_store_location() {
    let root = TempDir::new().unwrap();
    let states_dir = root.path().join("states");
    std::fs::create_dir(&states_dir).unwrap();

    let config_path = root.path().join("statestore.toml");
    std::fs::write(
        &config_path,
        format!("states_dir = \"{}\"\n", states_dir.display()),
    )
    .unwrap();

    let config = StoreConfig::load(Some(&config_path)).unwrap();
    let mut store = config.open("configured").unwrap();
    store.set(Category::Channels, "channel-1", "mode", "strict");
    store.save().unwrap();

    assert!(states_dir.join("configured.json").exists());

    let reloaded = config.open("configured").unwrap();
    assert_eq!(
        reloaded.get(Category::Channels, "channel-1", "mode").unwrap(),
        &json!("strict")
    );
}

/// The default configuration resolves states under `states/`.
#[test]
fn test_default_states_dir_convention() {
    let config = StoreConfig::default();
    assert_eq!(config.states_dir, std::path::PathBuf::from("states"));
}

/// Opening through a config whose directory is missing surfaces the save-side
/// I/O error from the bootstrap.
#[test]
fn test_missing_states_dir_surfaces_io_error() {
    let root = TempDir::new().unwrap();
    let config_path = root.path().join("statestore.toml");
    std::fs::write(
        &config_path,
        format!(
            "states_dir = \"{}\"\n",
            root.path().join("absent").display()
        ),
    )
    .unwrap();

    let config = StoreConfig::load(Some(&config_path)).unwrap();
    assert!(matches!(
        config.open("orphan"),
        Err(statestore::StoreError::Io(_))
    ));
}
