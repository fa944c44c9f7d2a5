//! `vidsniff fetch <capture>` – download one discovered entry.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use vidsniff_core::config::SniffConfig;
use vidsniff_core::locator;
use vidsniff_core::transfer;

use super::replay;

pub fn run_fetch(
    cfg: &SniffConfig,
    path: &Path,
    id: Option<&str>,
    index: Option<usize>,
    out: Option<&str>,
) -> Result<()> {
    let (engine, _stats) = replay(cfg, path)?;
    let entries = engine.entries();

    let entry = match (id, index) {
        (Some(id), _) => entries
            .iter()
            .find(|e| e.content_id.as_deref() == Some(id))
            .with_context(|| format!("no entry with content id {id}"))?,
        (None, Some(i)) => entries
            .get(i)
            .with_context(|| format!("index {i} out of range ({} entries)", entries.len()))?,
        (None, None) => entries.first().context("capture yielded no media")?,
    };

    let dir = match out {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let filename = locator::derive_filename(&entry.label, &entry.locator);
    let dest = dir.join(&filename);

    let mut file = File::create(&dest)
        .with_context(|| format!("create output file: {}", dest.display()))?;

    println!("Downloading {}", entry.locator);
    let written = transfer::fetch(&entry.locator, &mut file, |done, total| {
        if let Some(total) = total.filter(|t| *t > 0) {
            let pct = (done * 100 / total).min(100);
            print!("\r{pct:>3}%");
        } else {
            print!("\r{done} bytes");
        }
        let _ = std::io::stdout().flush();
    })
    .with_context(|| format!("download failed for {}", entry.locator))?;

    println!("\nSaved {} bytes to {}", written, dest.display());
    Ok(())
}
