use std::sync::Arc;

use ds_schemas::{Bookmark, HadithRef};
use tracing::{info, warn};

use crate::{set_json, try_get_json, KvBackend, StoreError, KEYS};

/// Saved hadiths, most recent first, unique by composite id.
pub struct BookmarkStore {
    backend: Arc<dyn KvBackend>,
    items: Vec<Bookmark>,
    /// The last read succeeded, so `items` mirrors the store.
    synced: bool,
}

impl BookmarkStore {
    /// Open the store and load whatever is persisted.
    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        let mut store = Self {
            backend,
            items: Vec::new(),
            synced: false,
        };
        store.load();
        store
    }

    /// Re-read the persisted list (empty when nothing is stored).
    ///
    /// When the store cannot be read the last-known list is kept, and
    /// mutations are refused until a read succeeds again.
    pub fn load(&mut self) -> &[Bookmark] {
        match try_get_json(self.backend.as_ref(), KEYS.bookmarks) {
            Ok(items) => {
                self.items = items.unwrap_or_default();
                self.synced = true;
            }
            Err(e) => {
                warn!(error = %e, kept = self.items.len(), "bookmark read failed; keeping last-known list");
                self.synced = false;
            }
        }
        &self.items
    }

    pub fn list(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|b| b.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.id == id)
    }

    /// Remove the bookmark for `r` if present, otherwise prepend a new one.
    ///
    /// The new list is persisted before it replaces the in-memory copy.
    pub fn toggle(&mut self, r: &HadithRef, text: &str) -> Result<&[Bookmark], StoreError> {
        self.ensure_synced()?;
        let id = r.key();
        let next: Vec<Bookmark> = if self.contains(&id) {
            self.items.iter().filter(|b| b.id != id).cloned().collect()
        } else {
            let mut next = Vec::with_capacity(self.items.len() + 1);
            next.push(Bookmark::from_ref(r, text));
            next.extend(self.items.iter().filter(|b| b.id != id).cloned());
            next
        };
        let added = next.len() > self.items.len();
        self.commit(next)?;
        info!(id = %id, added, "bookmark toggled");
        Ok(&self.items)
    }

    /// Drop the bookmark with `id` (no-op if absent, still persisted).
    pub fn remove(&mut self, id: &str) -> Result<&[Bookmark], StoreError> {
        self.ensure_synced()?;
        let next: Vec<Bookmark> = self.items.iter().filter(|b| b.id != id).cloned().collect();
        self.commit(next)?;
        info!(id, "bookmark removed");
        Ok(&self.items)
    }

    /// A whole-list write based on a list that was never read would replace
    /// everything stored.
    fn ensure_synced(&mut self) -> Result<(), StoreError> {
        if !self.synced {
            self.load();
        }
        if self.synced {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "bookmarks could not be read; not overwriting them".to_string(),
            ))
        }
    }

    fn commit(&mut self, next: Vec<Bookmark>) -> Result<(), StoreError> {
        set_json(self.backend.as_ref(), KEYS.bookmarks, &next)?;
        self.items = next;
        Ok(())
    }
}
