//! ds-store
//!
//! Local persistence for user annotations and preferences.
//!
//! - [`KvBackend`]: string-keyed get/set over a local store ([`FileBackend`],
//!   [`MemoryBackend`]).
//! - [`get_json`] / [`set_json`]: typed JSON access with default fallback.
//! - [`BookmarkStore`], [`ReactionStore`], [`SettingsStore`]: whole-value
//!   read-modify-write stores. A mutation is committed to memory only after the
//!   write succeeded, so what the user sees never drifts from what is on disk.
//! - [`AppContext`]: the explicit, shared application state handed to views.

mod backend;
mod bookmarks;
mod context;
mod error;
mod json;
mod reactions;
mod settings;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use bookmarks::BookmarkStore;
pub use context::AppContext;
pub use error::StoreError;
pub use json::{ensure_key_format, get_json, set_json, try_get_json, KeyFormatCheck, KEYS};
pub use reactions::{ReactionMap, ReactionStore};
pub use settings::SettingsStore;
