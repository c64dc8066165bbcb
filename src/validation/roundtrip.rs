//! Save file inspection

use crate::persist;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// What a save file contains
#[derive(Debug, Clone, Default)]
pub struct SaveFileSummary {
    /// File size in bytes
    pub file_size: u64,

    /// Record count announced by the header
    pub declared: u32,

    /// Records that decoded cleanly
    pub readable: usize,

    /// Urls that appear more than once, in first-seen order
    pub duplicate_urls: Vec<String>,

    /// Why decoding stopped early, if it did
    pub stopped_early: Option<String>,
}

impl SaveFileSummary {
    /// Header and records agree and every url is unique
    pub fn is_clean(&self) -> bool {
        self.stopped_early.is_none()
            && self.readable == self.declared as usize
            && self.duplicate_urls.is_empty()
    }
}

/// Parse a save file and report on its health
///
/// A damaged record stream is reported, not failed; only a missing file or an
/// unreadable header is an error.
pub fn inspect_save_file(path: &Path) -> Result<SaveFileSummary> {
    log::info!("Inspecting save file: {:?}", path);

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Save file not found: {:?}", path))?;

    let outcome = persist::read_file(path)
        .with_context(|| format!("Failed to parse save file: {:?}", path))?
        .with_context(|| format!("Save file disappeared: {:?}", path))?;

    let mut seen = HashSet::new();
    let mut duplicate_urls = Vec::new();
    for entry in &outcome.entries {
        if !seen.insert(entry.url.as_str()) && !duplicate_urls.contains(&entry.url) {
            duplicate_urls.push(entry.url.clone());
        }
    }

    let summary = SaveFileSummary {
        file_size: metadata.len(),
        declared: outcome.declared,
        readable: outcome.entries.len(),
        duplicate_urls,
        stopped_early: outcome.stopped_early,
    };

    log::info!("  - Size: {} bytes", summary.file_size);
    log::info!("  - Entries: {} of {} readable", summary.readable, summary.declared);
    for url in &summary.duplicate_urls {
        log::warn!("  - Duplicate url: {}", url);
    }
    if let Some(reason) = &summary.stopped_early {
        log::warn!("  - Damaged: {}", reason);
    }

    Ok(summary)
}
