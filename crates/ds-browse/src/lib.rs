//! ds-browse
//!
//! Reader-side data flow for one open section:
//!
//! - [`SectionPager`]: downloads the section once and windows it into
//!   fixed-size pages appended to an accumulating list. Fetch results carry a
//!   [`FetchTicket`]; results whose ticket predates the last reset are dropped.
//! - [`item_state`] / [`reconcile_page`]: per-item bookmark / reaction state,
//!   recomputed on every call.

mod pager;
mod reconcile;

pub use pager::{Completion, FetchTicket, PagerPhase, SectionPager, PAGE_SIZE};
pub use reconcile::{item_state, reconcile_page, ItemState};
