//! ds-schemas
//!
//! Shared data model for the hadith reader: references, composite keys,
//! bookmarks, the remote section payload shape and the book/language catalog.
//!
//! Pure types. No IO, no clock.

mod catalog;
mod id;
mod types;

pub use catalog::*;
pub use id::{make_id, CompositeKey, KEY_FORMAT_VERSION};
pub use types::*;
