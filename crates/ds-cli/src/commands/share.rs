//! `ds share`: the text handed to a share sheet, optionally exported.

use anyhow::Result;
use std::fs;
use tracing::warn;

use super::Runtime;

pub async fn share(rt: &Runtime, section: &str, number: u64, out: Option<&str>) -> Result<()> {
    let target = rt.target(section);
    let hadith = rt.find_hadith(&target, number).await?;
    let message = hadith.share_message(&target.book);

    println!("{message}");

    // A failed export is reported but does not fail the command.
    if let Some(path) = out {
        match fs::write(path, &message) {
            Ok(()) => println!("exported={path}"),
            Err(e) => {
                warn!(path, error = %e, "share export failed");
                eprintln!("WARN: share export to {path} failed: {e}");
            }
        }
    }
    Ok(())
}
