//! `ds settings ...` and `ds config show`.

use anyhow::{Context, Result};
use ds_config::AppConfig;
use ds_schemas::{BOOKS, LANGUAGES, REACTIONS};

use super::Runtime;

pub fn show(rt: &Runtime) {
    let s = rt.ctx.settings();
    println!("book={} lang={}", s.book, s.lang);
}

pub fn set_book(rt: &mut Runtime, code: &str) -> Result<()> {
    let s = rt
        .ctx
        .set_book(code)
        .with_context(|| format!("book not changed to '{code}'"))?;
    println!("book={} lang={}", s.book, s.lang);
    Ok(())
}

pub fn set_lang(rt: &mut Runtime, code: &str) -> Result<()> {
    let s = rt
        .ctx
        .set_lang(code)
        .with_context(|| format!("language not changed to '{code}'"))?;
    println!("book={} lang={}", s.book, s.lang);
    Ok(())
}

pub fn catalog() -> Result<()> {
    for b in BOOKS {
        println!("book={} label={}", b.code, b.label);
    }
    for l in LANGUAGES {
        println!("lang={} label={}", l.code, l.label);
    }
    println!("reactions={}", REACTIONS.join(" "));
    Ok(())
}

pub fn config_show(config: &AppConfig) -> Result<()> {
    let s = serde_json::to_string_pretty(config).context("serialize config")?;
    println!("{s}");
    Ok(())
}
