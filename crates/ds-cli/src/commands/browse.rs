//! `ds sections`, `ds featured`, `ds read`.

use anyhow::{bail, Result};
use chrono::Local;
use ds_browse::PagerPhase;
use ds_source::{featured_number_for, HadithSource, FEATURED_POOL};

use super::{print_header, print_rows, source_failure, Runtime};

pub async fn sections(rt: &Runtime) -> Result<()> {
    let s = rt.ctx.settings();
    let sections = rt
        .source
        .fetch_book_sections(&s.book, &s.lang)
        .await
        .map_err(source_failure)?;

    println!("book={} lang={} sections={}", s.book, s.lang, sections.len());
    for entry in sections {
        println!("section={} title={}", entry.id, entry.title);
    }
    Ok(())
}

pub async fn featured(rt: &Runtime, number: Option<u32>) -> Result<()> {
    let number = match number {
        Some(n) if (1..=FEATURED_POOL).contains(&n) => n,
        Some(n) => bail!("--number must be in 1..={FEATURED_POOL}, got {n}"),
        None => featured_number_for(Local::now().date_naive()),
    };

    let s = rt.ctx.settings();
    let featured = rt
        .source
        .fetch_featured(&s.book, &s.lang, number)
        .await
        .map_err(source_failure)?;

    println!(
        "featured_number={} hadith={} section={}",
        number, featured.hadith.hadithnumber, featured.section_label
    );
    println!("{}", featured.hadith.text);
    Ok(())
}

pub async fn read(rt: &Runtime, section: &str, pages: usize, seek: Option<u64>) -> Result<()> {
    let mut pager = rt.pager(rt.target(section));

    if pager.load(&rt.source).await == PagerPhase::Failed {
        if let Some(e) = pager.last_error() {
            return Err(source_failure(e.clone()));
        }
    }

    for _ in 1..pages.max(1) {
        if !pager.advance() {
            break;
        }
    }

    let seek_hit = match seek {
        Some(n) => match pager.seek_to_number(n) {
            Some(idx) => Some((n, idx)),
            None => bail!("hadith {} not found in section {}", n, section),
        },
        None => None,
    };

    print_header(&pager);
    print_rows(rt, &pager);
    println!(
        "page={} total_pages={} items={}",
        pager.page_number(),
        pager.total_pages(),
        pager.items().len()
    );
    if let Some((n, idx)) = seek_hit {
        println!("seek={} index={}", n, idx);
    }
    Ok(())
}
