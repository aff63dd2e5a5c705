use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use ds_schemas::KEY_FORMAT_VERSION;

use crate::{KvBackend, StoreError};

/// Store keys used by the app.
#[derive(Debug, Clone, Copy)]
pub struct Keys {
    pub book: &'static str,
    pub lang: &'static str,
    pub bookmarks: &'static str,
    pub reactions: &'static str,
    pub key_format: &'static str,
}

pub const KEYS: Keys = Keys {
    book: "book",
    lang: "lang",
    bookmarks: "bookmarks",
    reactions: "reactions",
    key_format: "key_format",
};

/// Read and decode `key`, falling back to `default`.
///
/// Never fails: a missing key is the normal first-run case, and read or decode
/// failures are logged and treated as missing.
pub fn get_json<T: DeserializeOwned>(backend: &dyn KvBackend, key: &str, default: T) -> T {
    match try_get_json(backend, key) {
        Ok(Some(v)) => v,
        Ok(None) => default,
        Err(e) => {
            warn!(key, error = %e, "store read failed; using default");
            default
        }
    }
}

/// Like [`get_json`], but a failed read is returned instead of defaulted.
///
/// `Ok(None)` covers both a missing key and an undecodable value (logged).
pub fn try_get_json<T: DeserializeOwned>(
    backend: &dyn KvBackend,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(key, error = %e, "stored value undecodable; treating as unset");
            Ok(None)
        }
    }
}

/// Serialise the full value and replace whatever was stored under `key`.
pub fn set_json<T: Serialize + ?Sized>(
    backend: &dyn KvBackend,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    backend.set(key, &raw)
}

/// Outcome of [`ensure_key_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormatCheck {
    /// No stamp existed; the current version was written.
    Stamped,
    /// Stored annotations were written with the current key format.
    Current,
    /// Stored annotations use another format and need a key rewrite.
    Mismatch { found: u32 },
    /// The stamp could not be read or written; nothing is known.
    Unknown,
}

/// Stamp the key format on first run and detect a format change afterwards.
///
/// A mismatch is only reported; existing data is left untouched.
pub fn ensure_key_format(backend: &dyn KvBackend) -> Result<KeyFormatCheck, StoreError> {
    let found: Option<u32> = get_json(backend, KEYS.key_format, None);
    match found {
        None => {
            set_json(backend, KEYS.key_format, &KEY_FORMAT_VERSION)?;
            Ok(KeyFormatCheck::Stamped)
        }
        Some(v) if v == KEY_FORMAT_VERSION => Ok(KeyFormatCheck::Current),
        Some(v) => {
            warn!(
                found = v,
                expected = KEY_FORMAT_VERSION,
                "persisted bookmark/reaction keys use another format"
            );
            Ok(KeyFormatCheck::Mismatch { found: v })
        }
    }
}
