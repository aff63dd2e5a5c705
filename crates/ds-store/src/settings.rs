use std::sync::Arc;

use ds_schemas::{find_book, find_language, Settings};
use tracing::{info, warn};

use crate::{set_json, KvBackend, StoreError, KEYS};

/// Persisted (book, lang) preference.
///
/// Defaults are written on first run only. Once values are known, an
/// unreadable store keeps the last-known values instead of falling back to
/// the defaults.
pub struct SettingsStore {
    backend: Arc<dyn KvBackend>,
    current: Settings,
}

impl SettingsStore {
    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        let mut store = Self {
            backend,
            current: Settings::default(),
        };
        store.load();
        store
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Refresh from the store.
    pub fn load(&mut self) -> &Settings {
        let book = self.read_field(KEYS.book, self.current.book.clone());
        let lang = self.read_field(KEYS.lang, self.current.lang.clone());
        self.current = Settings { book, lang };
        &self.current
    }

    pub fn set_book(&mut self, book: &str) -> Result<&Settings, StoreError> {
        if find_book(book).is_none() {
            return Err(StoreError::Rejected(format!("unknown book '{book}'")));
        }
        set_json(self.backend.as_ref(), KEYS.book, book)?;
        self.current.book = book.to_string();
        info!(book, "book preference saved");
        Ok(&self.current)
    }

    pub fn set_lang(&mut self, lang: &str) -> Result<&Settings, StoreError> {
        if find_language(lang).is_none() {
            return Err(StoreError::Rejected(format!("unknown language '{lang}'")));
        }
        set_json(self.backend.as_ref(), KEYS.lang, lang)?;
        self.current.lang = lang.to_string();
        info!(lang, "language preference saved");
        Ok(&self.current)
    }

    fn read_field(&self, key: &str, fallback: String) -> String {
        match self.backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<String>(&raw) {
                Ok(v) if !v.is_empty() => v,
                _ => {
                    warn!(key, "stored setting undecodable; keeping '{}'", fallback);
                    fallback
                }
            },
            Ok(None) => {
                // First run: persist the default so later runs read it back.
                if let Err(e) = set_json(self.backend.as_ref(), key, &fallback) {
                    warn!(key, error = %e, "could not persist default setting");
                }
                fallback
            }
            Err(e) => {
                warn!(key, error = %e, "settings read failed; keeping '{}'", fallback);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;

    #[test]
    fn first_run_writes_defaults() {
        let be = Arc::new(MemoryBackend::new());
        let s = SettingsStore::open(be.clone());
        assert_eq!(s.current(), &Settings::default());
        assert_eq!(be.get(KEYS.book).unwrap().as_deref(), Some("\"bukhari\""));
        assert_eq!(be.get(KEYS.lang).unwrap().as_deref(), Some("\"eng\""));
    }

    #[test]
    fn unknown_values_rejected_without_write() {
        let be = Arc::new(MemoryBackend::new());
        let mut s = SettingsStore::open(be.clone());
        assert!(matches!(s.set_book("nope"), Err(StoreError::Rejected(_))));
        assert!(matches!(s.set_lang("de"), Err(StoreError::Rejected(_))));
        assert_eq!(s.current(), &Settings::default());
    }

    #[test]
    fn persisted_values_reloaded() {
        let be = Arc::new(MemoryBackend::new());
        {
            let mut s = SettingsStore::open(be.clone());
            s.set_book("muslim").unwrap();
            s.set_lang("ara").unwrap();
        }
        let s = SettingsStore::open(be);
        assert_eq!(s.current().book, "muslim");
        assert_eq!(s.current().lang, "ara");
    }
}
