//! Explicit application state shared by every view.
//!
//! Replaces process-global settings: views receive `&mut AppContext` (or a
//! [`watch::Receiver`] from [`AppContext::subscribe`]) and re-run their
//! fetches when the published [`Settings`] change.

use std::sync::Arc;

use ds_schemas::Settings;
use tokio::sync::watch;
use tracing::warn;

use crate::{
    ensure_key_format, BookmarkStore, KeyFormatCheck, KvBackend, ReactionStore, SettingsStore,
    StoreError,
};

pub struct AppContext {
    settings: SettingsStore,
    bookmarks: BookmarkStore,
    reactions: ReactionStore,
    key_format: KeyFormatCheck,
    tx: watch::Sender<Settings>,
}

impl AppContext {
    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        let key_format = match ensure_key_format(backend.as_ref()) {
            Ok(check) => check,
            Err(e) => {
                warn!(error = %e, "could not stamp key format");
                KeyFormatCheck::Unknown
            }
        };
        let settings = SettingsStore::open(Arc::clone(&backend));
        let (tx, _rx) = watch::channel(settings.current().clone());
        Self {
            settings,
            bookmarks: BookmarkStore::open(Arc::clone(&backend)),
            reactions: ReactionStore::open(backend),
            key_format,
            tx,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings.current().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    pub fn key_format(&self) -> KeyFormatCheck {
        self.key_format
    }

    pub fn set_book(&mut self, book: &str) -> Result<Settings, StoreError> {
        let next = self.settings.set_book(book)?.clone();
        self.publish(next.clone());
        Ok(next)
    }

    pub fn set_lang(&mut self, lang: &str) -> Result<Settings, StoreError> {
        let next = self.settings.set_lang(lang)?.clone();
        self.publish(next.clone());
        Ok(next)
    }

    /// Re-read settings from the store and publish them if they changed.
    pub fn reload_settings(&mut self) -> Settings {
        let next = self.settings.load().clone();
        self.publish(next.clone());
        next
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut BookmarkStore {
        &mut self.bookmarks
    }

    pub fn reactions(&self) -> &ReactionStore {
        &self.reactions
    }

    pub fn reactions_mut(&mut self) -> &mut ReactionStore {
        &mut self.reactions
    }

    fn publish(&self, next: Settings) {
        self.tx.send_if_modified(|cur| {
            if *cur == next {
                false
            } else {
                *cur = next;
                true
            }
        });
    }
}
