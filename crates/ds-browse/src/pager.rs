//! Paginated fetch controller.
//!
//! # State machine
//!
//! | From      | Event                          | To        |
//! |-----------|--------------------------------|-----------|
//! | any       | `reset` / settings change      | `Idle`    |
//! | `Idle`    | `begin_fetch`                  | `Loading` |
//! | `Loading` | `complete(Ok)`                 | `Loaded`  |
//! | `Loading` | `complete(Err)`                | `Failed`  |
//! | `Failed`  | `begin_fetch` (retry)          | `Loading` |
//! | `Loaded`  | `advance` (slice cached body)  | `Loaded`  |
//! | `Loaded`  | `begin_refresh`                | `Loading` |
//!
//! The upstream serves a whole section per request, so pages are a client
//! side window over one payload: only the first load touches the network.

use ds_schemas::{Hadith, SectionMetadata, SectionPayload, SectionTarget, Settings};
use ds_source::{HadithSource, SourceError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const PAGE_SIZE: usize = ds_schemas::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Issued by [`SectionPager::begin_fetch`]; must be handed back to
/// [`SectionPager::complete`] with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The pager was reset while the fetch was in flight; result dropped.
    Stale,
}

#[derive(Debug)]
pub struct SectionPager {
    target: SectionTarget,
    page_size: usize,
    phase: PagerPhase,
    page_number: usize,
    total_pages: usize,
    loaded_pages: usize,
    payload: Option<SectionPayload>,
    items: Vec<Hadith>,
    last_error: Option<SourceError>,
    generation: u64,
}

impl SectionPager {
    pub fn new(target: SectionTarget) -> Self {
        Self::with_page_size(target, PAGE_SIZE)
    }

    pub fn with_page_size(target: SectionTarget, page_size: usize) -> Self {
        Self {
            target,
            page_size: page_size.max(1),
            phase: PagerPhase::Idle,
            page_number: 1,
            total_pages: 0,
            loaded_pages: 0,
            payload: None,
            items: Vec::new(),
            last_error: None,
            generation: 0,
        }
    }

    pub fn target(&self) -> &SectionTarget {
        &self.target
    }

    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Everything appended so far, in upstream order.
    pub fn items(&self) -> &[Hadith] {
        &self.items
    }

    pub fn metadata(&self) -> Option<&SectionMetadata> {
        self.payload.as_ref().map(|p| &p.metadata)
    }

    pub fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    /// More pages can be sliced without a fetch.
    pub fn has_more(&self) -> bool {
        self.phase == PagerPhase::Loaded && self.page_number < self.total_pages
    }

    /// Drop everything and point at `target`. In-flight fetches become stale.
    pub fn reset(&mut self, target: SectionTarget) {
        debug!(book = %target.book, section = %target.section, lang = %target.lang, "pager reset");
        self.generation += 1;
        self.target = target;
        self.phase = PagerPhase::Idle;
        self.page_number = 1;
        self.total_pages = 0;
        self.loaded_pages = 0;
        self.payload = None;
        self.items.clear();
        self.last_error = None;
    }

    /// Reset when the active book or language no longer matches the target.
    pub fn on_settings_changed(&mut self, settings: &Settings) -> bool {
        if settings.book == self.target.book && settings.lang == self.target.lang {
            return false;
        }
        let next = SectionTarget::new(&settings.book, &self.target.section, &settings.lang);
        self.reset(next);
        true
    }

    /// Apply a pending settings change from the shared context, if any.
    pub fn sync_settings(&mut self, rx: &mut watch::Receiver<Settings>) -> bool {
        match rx.has_changed() {
            Ok(true) => {
                let settings = rx.borrow_and_update().clone();
                self.on_settings_changed(&settings)
            }
            _ => false,
        }
    }

    /// Enter `Loading` if a download is needed and none is in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        match self.phase {
            PagerPhase::Loading | PagerPhase::Loaded => None,
            PagerPhase::Idle | PagerPhase::Failed => {
                self.phase = PagerPhase::Loading;
                self.last_error = None;
                Some(FetchTicket {
                    generation: self.generation,
                })
            }
        }
    }

    /// Re-download a section that is already shown.
    ///
    /// On success the list is rebuilt from the fresh payload up to the current
    /// page; on failure the shown items and page number are left untouched.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        if self.phase == PagerPhase::Loading {
            return None;
        }
        self.phase = PagerPhase::Loading;
        self.last_error = None;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Hand back the result of the fetch started with `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<SectionPayload, SourceError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale section fetch"
            );
            return Completion::Stale;
        }

        match result {
            Ok(payload) => {
                self.total_pages = payload.hadiths.len().div_ceil(self.page_size);
                self.page_number = self.page_number.min(self.total_pages).max(1);
                self.payload = Some(payload);
                self.items.clear();
                self.loaded_pages = 0;
                self.append_through_current_page();
                self.phase = PagerPhase::Loaded;
                info!(
                    book = %self.target.book,
                    section = %self.target.section,
                    lang = %self.target.lang,
                    total_pages = self.total_pages,
                    "section loaded"
                );
            }
            Err(e) => {
                warn!(
                    book = %self.target.book,
                    section = %self.target.section,
                    lang = %self.target.lang,
                    error = %e,
                    "section fetch failed"
                );
                self.phase = PagerPhase::Failed;
                self.last_error = Some(e);
            }
        }
        Completion::Applied
    }

    /// Fetch (if needed) and slice the current page.
    pub async fn load(&mut self, source: &dyn HadithSource) -> PagerPhase {
        if let Some(ticket) = self.begin_fetch() {
            let target = self.target.clone();
            debug!(source = source.source_name(), section = %target.section, "section fetch");
            let result = source.fetch_section(&target).await;
            self.complete(ticket, result);
        }
        self.phase
    }

    /// Re-issue the fetch after a failure.
    pub async fn retry(&mut self, source: &dyn HadithSource) -> PagerPhase {
        if self.phase == PagerPhase::Failed {
            return self.load(source).await;
        }
        self.phase
    }

    /// Download the section again (pull-to-refresh).
    pub async fn refresh(&mut self, source: &dyn HadithSource) -> PagerPhase {
        if let Some(ticket) = self.begin_refresh() {
            let target = self.target.clone();
            debug!(source = source.source_name(), section = %target.section, "section fetch");
            let result = source.fetch_section(&target).await;
            self.complete(ticket, result);
        }
        self.phase
    }

    /// Slice the next page from the downloaded payload.
    ///
    /// Returns `false` when nothing was appended (no more pages, a fetch in
    /// flight, or the section failed to load).
    pub fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.phase = PagerPhase::Loading;
        self.page_number += 1;
        self.append_through_current_page();
        self.phase = PagerPhase::Loaded;
        true
    }

    /// Advance until hadith `number` is in [`items`](Self::items).
    ///
    /// Returns its index, or `None` if the section does not contain it.
    pub fn seek_to_number(&mut self, number: u64) -> Option<usize> {
        loop {
            if let Some(i) = self.items.iter().position(|h| h.hadithnumber == number) {
                return Some(i);
            }
            if !self.advance() {
                return None;
            }
        }
    }

    /// 1-based page holding hadith `number` in the downloaded payload.
    pub fn page_for_number(&self, number: u64) -> Option<usize> {
        let payload = self.payload.as_ref()?;
        payload
            .hadiths
            .iter()
            .position(|h| h.hadithnumber == number)
            .map(|i| i / self.page_size + 1)
    }

    fn append_through_current_page(&mut self) {
        let Some(payload) = self.payload.as_ref() else {
            return;
        };
        let last = self.page_number.min(self.total_pages);
        while self.loaded_pages < last {
            let page = self.loaded_pages + 1;
            let start = (page - 1) * self.page_size;
            let end = (page * self.page_size).min(payload.hadiths.len());
            self.items.extend_from_slice(&payload.hadiths[start..end]);
            self.loaded_pages = page;
        }
    }
}
