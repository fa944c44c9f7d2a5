//! `vidsniff scan <capture>` – replay a capture and print the catalog.

use anyhow::Result;
use std::path::Path;

use vidsniff_core::config::SniffConfig;

use super::{cell, replay};

pub fn run_scan(cfg: &SniffConfig, path: &Path) -> Result<()> {
    let (engine, stats) = replay(cfg, path)?;

    let entries = engine.entries();
    if entries.is_empty() {
        println!(
            "No media found ({} requests, {} payloads scanned).",
            stats.requests, stats.payloads
        );
        return Ok(());
    }

    println!("{:<2} {:<4} {:<4} {:<20} {:<34} {}", "", "#", "SRC", "ID", "TITLE", "URL");
    for (i, entry) in entries.iter().enumerate() {
        let marker = if entry.active { "*" } else { "" };
        println!(
            "{:<2} {:<4} {:<4} {:<20} {:<34} {}",
            marker,
            i,
            entry.source,
            entry.content_id.as_deref().unwrap_or("-"),
            cell(&entry.label, 32),
            entry.locator
        );
    }
    println!(
        "{} entries ({} requests, {} payloads scanned)",
        entries.len(),
        stats.requests,
        stats.payloads
    );
    Ok(())
}
