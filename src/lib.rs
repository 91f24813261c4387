//! Statestore: file-backed state snapshots
//!
//! A minimal persisted key-value store. A named state loads from a JSON
//! document on disk into an in-memory [`store::Store`] partitioned into five
//! fixed categories, callers get/set/delete JSON values scoped by an entity
//! ID within a category, and an explicit save persists the whole structure
//! back to the same file.

pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use store::{Bag, Category, Store};
