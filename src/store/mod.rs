//! In-memory state store partitioned into fixed categories.
//!
//! A [`Store`] holds five named category maps, each mapping an entity ID to a
//! [`Bag`] of arbitrary JSON values. Category and bag maps are materialized
//! lazily on first write, so reads never observe a missing map. Persistence
//! lives in [`persistence`]; mutation here is in-memory only and callers
//! invoke [`Store::save`] at natural batching points.

mod persistence;

pub use persistence::state_path;

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The fixed set of top-level partitions of a state.
///
/// The set is closed by design: every state file carries at most these five
/// maps, and the enum being exhaustively matchable keeps it that way at
/// compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Configs,
    Channels,
    Messages,
    Servers,
    Users,
}

impl Category {
    /// All categories, in on-disk order.
    pub const ALL: [Category; 5] = [
        Category::Configs,
        Category::Channels,
        Category::Messages,
        Category::Servers,
        Category::Users,
    ];

    /// The category's key in the state document.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Configs => "configs",
            Category::Channels => "channels",
            Category::Messages => "messages",
            Category::Servers => "servers",
            Category::Users => "users",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The key-value data owned by one entity within one category.
///
/// Serializes as `{"data": {...}}` with the `data` map omitted when empty.
/// Values are arbitrary JSON ([`serde_json::Value`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    data: HashMap<String, Value>,
}

impl Bag {
    /// Get the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Store `value` under `key`, overwriting any prior value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Remove `key`. No-op if the key was already absent.
    pub fn del(&mut self, key: &str) {
        self.data.remove(key);
    }

    /// Number of keys in the bag.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the bag holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Map from entity ID to its bag.
pub type CategoryMap = HashMap<String, Bag>;

/// A named, file-backed snapshot of partitioned key-value state.
///
/// Created by [`Store::open`], which resolves the state file path and loads
/// (or self-heals) its content. Empty category maps are omitted from the
/// serialized document, so a fresh store serializes to `{}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    configs: CategoryMap,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    channels: CategoryMap,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    messages: CategoryMap,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    servers: CategoryMap,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    users: CategoryMap,

    /// Resolved state file path, established at construction.
    #[serde(skip)]
    path: PathBuf,
}

impl Store {
    pub(crate) fn empty(path: PathBuf) -> Self {
        Store {
            configs: CategoryMap::new(),
            channels: CategoryMap::new(),
            messages: CategoryMap::new(),
            servers: CategoryMap::new(),
            users: CategoryMap::new(),
            path,
        }
    }

    /// The state file this store loads from and saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    fn category(&self, category: Category) -> &CategoryMap {
        match category {
            Category::Configs => &self.configs,
            Category::Channels => &self.channels,
            Category::Messages => &self.messages,
            Category::Servers => &self.servers,
            Category::Users => &self.users,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut CategoryMap {
        match category {
            Category::Configs => &mut self.configs,
            Category::Channels => &mut self.channels,
            Category::Messages => &mut self.messages,
            Category::Servers => &mut self.servers,
            Category::Users => &mut self.users,
        }
    }

    /// Get-or-create the bag for `entity` within `category`.
    fn bag_mut(&mut self, category: Category, entity: &str) -> &mut Bag {
        self.category_mut(category)
            .entry(entity.to_string())
            .or_default()
    }

    /// Get the value stored for `key` within `entity`'s bag.
    ///
    /// Fails with [`StoreError::NotFound`] when the entity has never been
    /// created in this category, or when it exists but lacks the key.
    /// Read-only; never materializes maps and never persists.
    pub fn get(&self, category: Category, entity: &str, key: &str) -> Result<&Value, StoreError> {
        self.category(category)
            .get(entity)
            .and_then(|bag| bag.get(key))
            .ok_or_else(|| StoreError::NotFound {
                category,
                entity: entity.to_string(),
                key: key.to_string(),
            })
    }

    /// Store `value` under `key` within `entity`'s bag, creating the bag on
    /// first write. Overwrites any prior value for the key.
    ///
    /// In-memory only; call [`Store::save`] to persist.
    pub fn set(
        &mut self,
        category: Category,
        entity: &str,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.bag_mut(category, entity).set(key, value);
    }

    /// Remove `key` from `entity`'s bag.
    ///
    /// Silent no-op when the key or the entity is absent. The bag itself is
    /// kept even when its last key is removed.
    pub fn del(&mut self, category: Category, entity: &str, key: &str) {
        if let Some(bag) = self.category_mut(category).get_mut(entity) {
            bag.del(key);
        }
    }

    /// True when `entity` has a bag in `category`, even an empty one.
    pub fn contains_entity(&self, category: Category, entity: &str) -> bool {
        self.category(category).contains_key(entity)
    }

    /// True when every category map is empty.
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.category(*c).is_empty())
    }

    /// Number of entities across all categories.
    pub fn entity_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.category(*c).len()).sum()
    }
}
