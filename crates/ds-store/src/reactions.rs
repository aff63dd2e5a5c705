use std::collections::BTreeMap;
use std::sync::Arc;

use ds_schemas::{CompositeKey, HadithRef};
use tracing::{info, warn};

use crate::{set_json, try_get_json, KvBackend, StoreError, KEYS};

/// Composite key -> emoji.
pub type ReactionMap = BTreeMap<CompositeKey, String>;

/// At most one emoji reaction per hadith.
pub struct ReactionStore {
    backend: Arc<dyn KvBackend>,
    map: ReactionMap,
    /// The last read succeeded, so `map` mirrors the store.
    synced: bool,
}

impl ReactionStore {
    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        let mut store = Self {
            backend,
            map: ReactionMap::new(),
            synced: false,
        };
        store.load();
        store
    }

    /// Re-read the persisted map; an unreadable store keeps the last-known map.
    pub fn load(&mut self) -> &ReactionMap {
        match try_get_json::<ReactionMap>(self.backend.as_ref(), KEYS.reactions) {
            Ok(map) => {
                let mut map = map.unwrap_or_default();
                prune(&mut map);
                self.map = map;
                self.synced = true;
            }
            Err(e) => {
                warn!(error = %e, kept = self.map.len(), "reaction read failed; keeping last-known map");
                self.synced = false;
            }
        }
        &self.map
    }

    pub fn map(&self) -> &ReactionMap {
        &self.map
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Set `emoji` on `r`, or clear it when it is already the active reaction.
    ///
    /// An empty `emoji` clears the reaction.
    pub fn react(&mut self, r: &HadithRef, emoji: &str) -> Result<&ReactionMap, StoreError> {
        self.ensure_synced()?;
        let key = r.key();
        let mut next = self.map.clone();
        if next.get(&key).map(String::as_str) == Some(emoji) {
            next.remove(&key);
        } else {
            next.insert(key.clone(), emoji.to_string());
        }
        prune(&mut next);
        self.commit(next)?;
        info!(key = %key, active = ?self.map.get(&key), "reaction updated");
        Ok(&self.map)
    }

    /// Remove any reaction on `r`.
    pub fn clear(&mut self, r: &HadithRef) -> Result<&ReactionMap, StoreError> {
        self.ensure_synced()?;
        let mut next = self.map.clone();
        next.remove(&r.key());
        self.commit(next)?;
        Ok(&self.map)
    }

    fn ensure_synced(&mut self) -> Result<(), StoreError> {
        if !self.synced {
            self.load();
        }
        if self.synced {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "reactions could not be read; not overwriting them".to_string(),
            ))
        }
    }

    fn commit(&mut self, next: ReactionMap) -> Result<(), StoreError> {
        set_json(self.backend.as_ref(), KEYS.reactions, &next)?;
        self.map = next;
        Ok(())
    }
}

/// A stored reaction is never "empty".
fn prune(map: &mut ReactionMap) {
    map.retain(|_, v| !v.trim().is_empty());
}
