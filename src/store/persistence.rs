//! Persistence lifecycle for the state store.
//!
//! A state lives in a single pretty-printed JSON document at
//! `{states_dir}/{state}.json`. Loading is self-healing: a missing or corrupt
//! file is never fatal, it resets the store to empty and persists the empty
//! snapshot. Saving overwrites the whole document atomically (write to a
//! temporary file, then rename).

use crate::error::StoreError;
use crate::store::Store;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Compute the state file path for a state name.
///
/// Path structure: `{states_dir}/{state}.json`.
pub fn state_path(states_dir: &Path, state: &str) -> PathBuf {
    states_dir.join(format!("{}.json", state))
}

/// Reject state names that would escape the states directory.
fn validate_state_name(state: &str) -> Result<(), StoreError> {
    if state.is_empty()
        || state.contains('/')
        || state.contains('\\')
        || state.contains("..")
    {
        return Err(StoreError::InvalidState(state.to_string()));
    }
    Ok(())
}

impl Store {
    /// Load the named state from `{states_dir}/{state}.json`.
    ///
    /// A missing, unreadable, or malformed state file is absorbed: the store
    /// resets to empty and immediately persists the empty snapshot, creating
    /// or overwriting the file. The only failures are an invalid state name
    /// and an error from that reinitializing save.
    ///
    /// The states directory is assumed to exist; it is not created here.
    pub fn open<P: AsRef<Path>>(states_dir: P, state: &str) -> Result<Self, StoreError> {
        validate_state_name(state)?;
        let path = state_path(states_dir.as_ref(), state);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                info!(
                    state,
                    path = %path.display(),
                    "State file unreadable, reinitializing: {}",
                    e
                );
                return Self::reinitialize(path);
            }
        };

        match serde_json::from_slice::<Store>(&bytes) {
            Ok(mut store) => {
                store.set_path(path);
                debug!(state, entities = store.entity_count(), "Loaded state");
                Ok(store)
            }
            Err(e) => {
                warn!(
                    state,
                    path = %path.display(),
                    "State file corrupt, reinitializing: {}",
                    e
                );
                Self::reinitialize(path)
            }
        }
    }

    /// Fresh empty store persisted at `path` (the self-healing bootstrap).
    fn reinitialize(path: PathBuf) -> Result<Self, StoreError> {
        let mut store = Store::empty(path);
        store.reset()?;
        Ok(store)
    }

    /// Replace all category maps with empty ones and persist immediately.
    ///
    /// The resolved file path is preserved. Fails only when the save fails.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let path = std::mem::take(&mut self.path);
        *self = Store::empty(path);
        self.save()
    }

    /// Serialize the whole store and write it to the resolved path,
    /// overwriting prior content.
    ///
    /// Uses atomic writes (write to .json.tmp, then rename), so a failed
    /// write leaves the previous on-disk snapshot intact. Fails with
    /// [`StoreError::Encode`] if serialization fails or [`StoreError::Io`]
    /// if the filesystem operation fails; neither is retried.
    pub fn save(&self) -> Result<(), StoreError> {
        let serialized = serde_json::to_vec_pretty(self)?;

        let temp_path = self.path().with_extension("json.tmp");
        fs::write(&temp_path, &serialized).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to write state to {:?}: {}", temp_path, e),
            ))
        })?;

        let path = self.path();
        fs::rename(&temp_path, path).map_err(|e| {
            // Clean up temp file on error
            let _ = fs::remove_file(&temp_path);
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to rename temp file to {:?}: {}", path, e),
            ))
        })?;

        debug!(path = %path.display(), bytes = serialized.len(), "Saved state");
        Ok(())
    }
}
