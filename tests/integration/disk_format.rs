//! Integration tests for the on-disk state document shape

use serde_json::json;
use statestore::{Category, Store};
use tempfile::TempDir;

fn read_document(states: &TempDir, state: &str) -> serde_json::Value {
    let content = std::fs::read_to_string(states.path().join(format!("{}.json", state))).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// An empty store serializes to `{}`: every category key is omitted.
#[test]
fn test_empty_store_serializes_to_empty_object() {
    let states = TempDir::new().unwrap();
    Store::open(states.path(), "empty").unwrap();

    assert_eq!(read_document(&states, "empty"), json!({}));
}

/// Only touched categories appear in the document, entities nest under
/// `{"data": {...}}`.
#[test]
fn test_document_shape() {
    let states = TempDir::new().unwrap();

    let mut store = Store::open(states.path(), "shaped").unwrap();
    store.set(Category::Channels, "channel-1", "mode", "strict");
    store.set(Category::Channels, "channel-1", "topic", "general");
    store.set(Category::Users, "user-1", "nickname", "ada");
    store.save().unwrap();

    let doc = read_document(&states, "shaped");
    assert_eq!(
        doc,
        json!({
            "channels": {
                "channel-1": {
                    "data": {"mode": "strict", "topic": "general"}
                }
            },
            "users": {
                "user-1": {
                    "data": {"nickname": "ada"}
                }
            }
        })
    );
}

/// The document is pretty-printed, not a single line.
#[test]
fn test_document_is_pretty_printed() {
    let states = TempDir::new().unwrap();

    let mut store = Store::open(states.path(), "pretty").unwrap();
    store.set(Category::Configs, "global", "retries", 3);
    store.save().unwrap();

    let content =
        std::fs::read_to_string(states.path().join("pretty.json")).unwrap();
    assert!(content.contains('\n'));
    assert!(content.contains("  \"configs\""));
}

/// A bag emptied by deletion still appears in the document: the entity
/// outlives its keys.
#[test]
fn test_emptied_bag_persists_in_document() {
    let states = TempDir::new().unwrap();

    let mut store = Store::open(states.path(), "tombless").unwrap();
    store.set(Category::Users, "user-1", "nickname", "ada");
    store.del(Category::Users, "user-1", "nickname");
    store.save().unwrap();

    let doc = read_document(&states, "tombless");
    assert_eq!(doc, json!({"users": {"user-1": {}}}));

    let reloaded = Store::open(states.path(), "tombless").unwrap();
    assert!(reloaded.contains_entity(Category::Users, "user-1"));
}

/// Saving fully overwrites prior content; removed entities do not linger.
#[test]
fn test_save_overwrites_whole_document() {
    let states = TempDir::new().unwrap();

    let mut store = Store::open(states.path(), "overwrite").unwrap();
    store.set(Category::Servers, "server-1", "region", "eu-west");
    store.set(Category::Servers, "server-2", "region", "us-east");
    store.save().unwrap();

    let mut store = Store::open(states.path(), "overwrite").unwrap();
    store.reset().unwrap();
    store.set(Category::Servers, "server-3", "region", "ap-south");
    store.save().unwrap();

    let doc = read_document(&states, "overwrite");
    assert_eq!(
        doc,
        json!({"servers": {"server-3": {"data": {"region": "ap-south"}}}})
    );
}

/// No stray temp file remains after a successful save.
#[test]
fn test_no_temp_file_left_behind() {
    let states = TempDir::new().unwrap();

    let mut store = Store::open(states.path(), "tidy").unwrap();
    store.set(Category::Messages, "msg-1", "pinned", true);
    store.save().unwrap();

    assert!(!states.path().join("tidy.json.tmp").exists());
}
