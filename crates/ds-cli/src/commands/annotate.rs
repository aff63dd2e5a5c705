//! Bookmarks and reactions.

use anyhow::{bail, Context, Result};
use ds_browse::PagerPhase;
use ds_schemas::REACTIONS;

use super::{print_header, print_rows, source_failure, Runtime};

pub async fn bookmark_toggle(rt: &mut Runtime, section: &str, number: u64) -> Result<()> {
    let target = rt.target(section);
    let r = target.hadith_ref(number);

    // Removing needs no text; adding snapshots it from the section.
    let text = if rt.ctx.bookmarks().contains(&r.key()) {
        String::new()
    } else {
        rt.find_hadith(&target, number).await?.text
    };

    rt.ctx
        .bookmarks_mut()
        .toggle(&r, &text)
        .context("bookmark not saved")?;
    let bookmarked = rt.ctx.bookmarks().contains(&r.key());
    println!("id={} bookmarked={}", r.key(), bookmarked);
    Ok(())
}

pub fn bookmark_list(rt: &Runtime) {
    let list = rt.ctx.bookmarks().list();
    println!("bookmarks={}", list.len());
    for b in list {
        println!("id={} book={} section={} number={} lang={}", b.id, b.book, b.section, b.number, b.lang);
    }
}

pub fn bookmark_remove(rt: &mut Runtime, id: &str) -> Result<()> {
    let existed = rt.ctx.bookmarks().contains(id);
    rt.ctx
        .bookmarks_mut()
        .remove(id)
        .context("bookmark not removed")?;
    println!("id={} removed={}", id, existed);
    Ok(())
}

/// Opens the bookmark's own section and language, whatever is active.
pub async fn bookmark_open(rt: &Runtime, id: &str) -> Result<()> {
    let Some(bookmark) = rt.ctx.bookmarks().get(id) else {
        bail!("no bookmark with id {id}");
    };
    let open = bookmark.open_target();

    let mut pager = rt.pager(open.section.clone());
    if pager.load(&rt.source).await == PagerPhase::Failed {
        if let Some(e) = pager.last_error() {
            return Err(source_failure(e.clone()));
        }
    }
    let Some(idx) = pager.seek_to_number(open.number) else {
        bail!("hadith {} is no longer in section {}", open.number, open.section.section);
    };

    print_header(&pager);
    print_rows(rt, &pager);
    println!("open={} page={} index={}", open.key(), pager.page_number(), idx);
    Ok(())
}

pub fn react(rt: &mut Runtime, section: &str, number: u64, emoji: &str) -> Result<()> {
    if !REACTIONS.contains(&emoji) {
        bail!("unknown reaction '{}'. expected one of: {}", emoji, REACTIONS.join(" "));
    }
    let r = rt.target(section).hadith_ref(number);
    let map = rt
        .ctx
        .reactions_mut()
        .react(&r, emoji)
        .context("reaction not saved")?;
    let active = map.get(&r.key()).map(String::as_str).unwrap_or("none");
    println!("id={} reaction={}", r.key(), active);
    Ok(())
}

pub fn reactions(rt: &Runtime) {
    let map = rt.ctx.reactions().map();
    println!("reactions={}", map.len());
    for (id, emoji) in map {
        println!("id={} reaction={}", id, emoji);
    }
}
