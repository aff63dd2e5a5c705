//! Command handler modules for the `ds` binary.
//!
//! Shared wiring (config, store, source) lives here; each submodule owns one
//! group of subcommands.

pub mod annotate;
pub mod browse;
pub mod settings;
pub mod share;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use ds_browse::{reconcile_page, SectionPager};
use ds_config::{report_unused_keys, AppConfig, UnusedKeyPolicy};
use ds_schemas::{Hadith, SectionTarget};
use ds_source::{CdnHadithSource, HadithSource, SourceError};
use ds_store::{AppContext, FileBackend, KeyFormatCheck, KvBackend};
use tracing::{debug, warn};

/// Layers from `--config`, then env overrides. Unused keys are warned about.
pub fn load_config(paths: &[String]) -> Result<AppConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = ds_config::load_effective(&path_refs)?;

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        eprintln!(
            "WARN: CONFIG_UNUSED_KEYS unused_leaf_keys={}",
            report.unused_leaf_pointers.len()
        );
        for p in &report.unused_leaf_pointers {
            eprintln!("  unused={}", p);
        }
    }
    Ok(loaded.config)
}

/// Everything a command needs: effective config, local state, remote source.
pub struct Runtime {
    pub config: AppConfig,
    pub ctx: AppContext,
    pub source: CdnHadithSource,
}

impl Runtime {
    pub fn open(config: AppConfig) -> Self {
        debug!(data_dir = %config.storage.data_dir.display(), "opening store");
        let backend: Arc<dyn KvBackend> = Arc::new(FileBackend::new(&config.storage.data_dir));
        let ctx = AppContext::open(backend);
        match ctx.key_format() {
            KeyFormatCheck::Mismatch { found } => {
                warn!(found, "stored bookmark keys were written by another version");
            }
            KeyFormatCheck::Unknown => {
                warn!("key format of stored bookmarks could not be checked");
            }
            KeyFormatCheck::Stamped | KeyFormatCheck::Current => {}
        }
        let source = CdnHadithSource::new_with_base_url(config.api.base_url.clone());
        Self {
            config,
            ctx,
            source,
        }
    }

    /// `section` of the active book in the active language.
    pub fn target(&self, section: &str) -> SectionTarget {
        let s = self.ctx.settings();
        SectionTarget::new(s.book, section, s.lang)
    }

    pub fn pager(&self, target: SectionTarget) -> SectionPager {
        SectionPager::with_page_size(target, self.config.paging.page_size)
    }

    /// Download `target` and pick hadith `number` out of it.
    pub async fn find_hadith(&self, target: &SectionTarget, number: u64) -> Result<Hadith> {
        let payload = self
            .source
            .fetch_section(target)
            .await
            .map_err(source_failure)?;
        payload
            .hadiths
            .into_iter()
            .find(|h| h.hadithnumber == number)
            .ok_or_else(|| {
                anyhow!(
                    "hadith {} not found in {}/{} ({})",
                    number,
                    target.book,
                    target.section,
                    target.lang
                )
            })
    }
}

/// A fetch failure as shown to the user: the error plus its hint.
pub fn source_failure(e: SourceError) -> anyhow::Error {
    anyhow!("{e}. {}", e.hint())
}

/// Book name and the open section's title, once the section has loaded.
pub fn print_header(pager: &SectionPager) {
    let Some(meta) = pager.metadata() else {
        return;
    };
    let section = match meta.current_section() {
        Some((id, title)) => format!("{id}: {title}"),
        None => pager.target().section.clone(),
    };
    println!("book_name={} section={}", meta.name, section);
}

/// Print the shown items of `pager` with their bookmark / reaction state.
pub fn print_rows(rt: &Runtime, pager: &SectionPager) {
    let rows = reconcile_page(
        pager.target(),
        pager.items(),
        rt.ctx.bookmarks(),
        rt.ctx.reactions(),
    );
    for (h, state) in rows {
        let mark = if state.is_bookmarked { "*" } else { " " };
        let reaction = state.active_reaction.as_deref().unwrap_or("-");
        println!(
            "#{} {} {} [Book {}, Hadith {}] {}",
            h.hadithnumber,
            mark,
            reaction,
            h.reference.book,
            h.reference.hadith,
            one_line(&h.text)
        );
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
