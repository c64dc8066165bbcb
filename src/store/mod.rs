//! Playlist store
//!
//! An ordered list of entries with move-on-insert deduplication, an optional
//! size bound that evicts from the tail, and a binary backing file.
//!
//! None of the public operations fail: invalid rows and I/O problems are
//! logged and leave the list unchanged (or partially loaded, for a corrupt
//! save file). Use `try_load` / `try_save` to see the error.

mod config;
mod events;

pub use config::StoreConfig;
pub use events::PlaylistEvent;

use crate::error::{PlaylistError, Result};
use crate::model::PlaylistEntry;
use crate::persist;
use crate::source;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

/// Ordered, deduplicated playlist with optional persistence
///
/// Single-threaded: events are delivered synchronously while the mutating
/// call runs.
#[derive(Debug)]
pub struct PlaylistStore {
    entries: Vec<PlaylistEntry>,
    config: StoreConfig,
    subscribers: Vec<Sender<PlaylistEvent>>,
}

impl PlaylistStore {
    /// Create an empty, unbounded store without a backing file
    pub fn new() -> Self {
        Self::with_config(StoreConfig::new())
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
            subscribers: Vec::new(),
        }
    }

    // --- configuration ---

    /// Set the backing file (an empty path disables persistence)
    pub fn set_save_file(&mut self, path: impl Into<PathBuf>) {
        self.config.save_file = config::normalize_save_file(path.into());
    }

    pub fn save_file(&self) -> Option<&Path> {
        self.config.save_file.as_deref()
    }

    /// Set the maximum size (0 or less disables the bound)
    ///
    /// An already oversized list is only trimmed by the next insertion.
    pub fn set_max_size(&mut self, max_size: i64) {
        self.config.max_size = config::normalize_max_size(max_size);
    }

    pub fn max_size(&self) -> Option<usize> {
        self.config.max_size
    }

    pub fn set_save_on_drop(&mut self, enabled: bool) {
        self.config.save_on_drop = enabled;
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&mut self) -> Receiver<PlaylistEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // --- reads ---

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaylistEntry> {
        self.entries.iter()
    }

    pub fn get(&self, row: usize) -> Option<&PlaylistEntry> {
        self.entries.get(row)
    }

    /// Copy of the entry at `row`, or an empty entry if out of range
    pub fn entry_at(&self, row: usize) -> PlaylistEntry {
        match self.entries.get(row) {
            Some(entry) => entry.clone(),
            None => {
                self.warn_invalid(row);
                PlaylistEntry::default()
            }
        }
    }

    /// Copy of the last entry with this url, or an empty entry
    pub fn entry_for(&self, url: &str) -> PlaylistEntry {
        self.index_of_url(url)
            .map(|i| self.entries[i].clone())
            .unwrap_or_default()
    }

    /// Highest index holding this url
    pub fn index_of_url(&self, url: &str) -> Option<usize> {
        self.entries.iter().rposition(|e| e.url == url)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.index_of_url(url).is_some()
    }

    // --- mutations ---

    /// Insert an entry at `row`, evicting and deduplicating first
    ///
    /// If an equal entry already sits elsewhere it is removed, so the entry
    /// ends up at `row` (or at the end, when `row` was the old end). A `row`
    /// past the end is a no-op after eviction.
    pub fn insert_at(&mut self, entry: PlaylistEntry, row: usize) {
        // Leave room for exactly one more entry
        if let Some(max) = self.config.max_size {
            if self.entries.len() >= max {
                let keep = max - 1;
                log::debug!("Evicting {} entries past row {}", self.entries.len() - keep, keep);
                self.remove_range(keep, self.entries.len() - keep);
            }
        }

        let after = row.saturating_add(1);
        if let Some(found) = self.entries.iter().skip(after).position(|e| *e == entry) {
            self.remove_at(after + found);
        }

        if row > self.entries.len() {
            log::warn!("Cannot insert at row {}: {}", row, self.invalid(row));
            return;
        }

        let mut target = row;
        if row > 0 {
            if let Some(found) = self.entries[..row].iter().rposition(|e| *e == entry) {
                self.remove_at(found);
                target = row.min(self.entries.len());
            }
        }

        self.entries.insert(target, PlaylistEntry::default());
        self.emit(PlaylistEvent::Inserted { row: target });
        self.set_at(entry, target);
    }

    /// Replace the entry at `row`
    pub fn set_at(&mut self, entry: PlaylistEntry, row: usize) {
        match self.entries.get_mut(row) {
            Some(slot) => {
                *slot = entry;
                self.emit(PlaylistEvent::Changed { row });
            }
            None => self.warn_invalid(row),
        }
    }

    /// Insert a bare url or path with a derived title
    pub fn insert_by_url(&mut self, url: impl Into<String>, row: usize) {
        self.insert_at(PlaylistEntry::from_url(url), row);
    }

    /// Remove every entry with this url; returns how many were removed
    pub fn remove_by_url(&mut self, url: &str) -> usize {
        let mut removed = 0;
        // High to low so earlier indices stay valid
        for row in (0..self.entries.len()).rev() {
            if self.entries[row].url == url {
                self.remove_at(row);
                removed += 1;
            }
        }
        removed
    }

    pub fn remove_at(&mut self, row: usize) {
        if row >= self.entries.len() {
            self.warn_invalid(row);
            return;
        }
        self.entries.remove(row);
        self.emit(PlaylistEvent::Removed { start: row, count: 1 });
    }

    /// Remove up to `count` entries starting at `start`, clamped to the list
    pub fn remove_range(&mut self, start: usize, count: usize) {
        let len = self.entries.len();
        if start > len {
            self.warn_invalid(start);
            return;
        }

        let end = start.saturating_add(count).min(len);
        if end == start {
            return;
        }

        self.entries.drain(start..end);
        self.emit(PlaylistEvent::Removed {
            start,
            count: end - start,
        });
    }

    pub fn clear(&mut self) {
        self.remove_range(0, self.entries.len());
    }

    /// Report a user activation of `row`, then save
    ///
    /// Returns the activated url.
    pub fn activate(&mut self, row: usize) -> Option<String> {
        let url = match self.entries.get(row) {
            Some(entry) => entry.url.clone(),
            None => {
                self.warn_invalid(row);
                return None;
            }
        };

        log::debug!("Activated row {}: {}", row, url);
        self.emit(PlaylistEvent::Activated { url: url.clone() });
        self.save();
        Some(url)
    }

    /// Insert files chosen by the user at successive rows from 0
    ///
    /// Paths that are not existing files are skipped, directories are
    /// expanded. Returns the number of entries inserted.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let files = source::collect_files(paths);
        for (row, file) in files.iter().enumerate() {
            self.insert_by_url(file.to_string_lossy().into_owned(), row);
        }
        files.len()
    }

    // --- persistence ---

    /// Replace the content with the backing file's entries
    ///
    /// A missing file leaves the store empty. A corrupt file keeps whatever
    /// records could be read before the damage.
    pub fn load(&mut self) {
        if let Err(e) = self.try_load() {
            log::warn!("Failed to load playlist: {}", e);
        }
    }

    /// Like `load`, but returns the error; `Ok` holds the resulting length
    pub fn try_load(&mut self) -> Result<usize> {
        let Some(path) = self.config.save_file.clone() else {
            log::debug!("No save file configured, nothing to load");
            return Ok(self.len());
        };

        let Some(outcome) = persist::read_file(&path)? else {
            log::debug!("Save file {:?} does not exist", path);
            return Ok(self.len());
        };

        if !outcome.is_complete() {
            log::warn!(
                "Save file {:?} is damaged: read {} of {} entries",
                path,
                outcome.entries.len(),
                outcome.declared
            );
        }

        self.clear();
        for (row, entry) in outcome.entries.into_iter().enumerate() {
            self.insert_at(entry, row);
        }

        log::info!("Loaded {} entries from {:?}", self.len(), path);
        Ok(self.len())
    }

    /// Write the entries to the backing file
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            log::warn!("Failed to save playlist: {}", e);
        }
    }

    /// Like `save`, but returns the error
    pub fn try_save(&self) -> Result<()> {
        let Some(path) = self.config.save_file.as_deref() else {
            log::debug!("No save file configured, not saving");
            return Ok(());
        };

        persist::write_file(path, &self.entries)?;
        log::debug!("Saved {} entries to {:?}", self.len(), path);
        Ok(())
    }

    /// Remove the backing file; the in-memory list is untouched
    ///
    /// Returns whether a file was deleted.
    pub fn delete_backing_file(&self) -> bool {
        let Some(path) = self.config.save_file.as_deref() else {
            log::debug!("No save file configured, nothing to delete");
            return false;
        };

        match persist::delete_file(path) {
            Ok(true) => {
                log::info!("Save file {:?} has been deleted", path);
                true
            }
            Ok(false) => {
                log::info!("Save file {:?} does not exist", path);
                false
            }
            Err(e) => {
                log::warn!("Failed to delete save file: {}", e);
                false
            }
        }
    }

    pub fn clear_and_delete(&mut self) {
        self.clear();
        self.delete_backing_file();
    }

    // --- helpers ---

    fn emit(&mut self, event: PlaylistEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn invalid(&self, row: usize) -> PlaylistError {
        PlaylistError::InvalidIndex {
            row,
            len: self.entries.len(),
        }
    }

    fn warn_invalid(&self, row: usize) {
        log::warn!("{}", self.invalid(row));
    }
}

impl Default for PlaylistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlaylistStore {
    fn drop(&mut self) {
        if self.config.save_on_drop && self.config.save_file.is_some() {
            self.save();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> PlaylistEntry {
        PlaylistEntry::from_url(url)
    }

    fn store_of(urls: &[&str]) -> PlaylistStore {
        let mut store = PlaylistStore::new();
        for (row, url) in urls.iter().enumerate() {
            store.insert_by_url(*url, row);
        }
        store
    }

    fn urls(store: &PlaylistStore) -> Vec<&str> {
        store.iter().map(|e| e.url.as_str()).collect()
    }

    #[test]
    fn test_insert_into_empty_unbounded_store() {
        let mut store = PlaylistStore::new();
        store.set_max_size(-1);
        store.insert_by_url("a.mp3", 0);

        assert_eq!(store.len(), 1);
        assert_eq!(store.entry_at(0).url, "a.mp3");
        assert_eq!(store.entry_at(0).title, "a.mp3");
    }

    #[test]
    fn test_eviction_makes_room_for_one() {
        let mut store = store_of(&["a", "b", "c"]);
        store.set_max_size(3);
        store.insert_at(entry("d"), 0);

        assert_eq!(urls(&store), vec!["d", "a", "b"]);
    }

    #[test]
    fn test_eviction_removes_tail_only() {
        let mut store = store_of(&["a", "b", "c", "d", "e"]);
        store.set_max_size(2);
        store.insert_at(entry("z"), 0);

        assert_eq!(urls(&store), vec!["z", "a"]);
    }

    #[test]
    fn test_length_never_exceeds_bound() {
        let mut store = PlaylistStore::new();
        store.set_max_size(4);
        for i in 0..20 {
            store.insert_by_url(format!("{}.mp3", i), i % 3);
            assert!(store.len() <= 4);
        }
    }

    #[test]
    fn test_shrinking_bound_waits_for_next_insert() {
        let mut store = store_of(&["a", "b", "c"]);
        store.set_max_size(1);
        assert_eq!(store.len(), 3);

        store.insert_at(entry("x"), 0);
        assert_eq!(urls(&store), vec!["x"]);
    }

    #[test]
    fn test_backward_duplicate_moves_entry() {
        let mut store = store_of(&["x", "y"]);
        store.insert_at(entry("x"), 1);

        assert_eq!(urls(&store), vec!["y", "x"]);
    }

    #[test]
    fn test_forward_duplicate_moves_entry() {
        let mut store = store_of(&["a", "b", "c"]);
        store.insert_at(entry("c"), 0);

        assert_eq!(urls(&store), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reinsert_at_end_moves_to_end() {
        let mut store = store_of(&["a", "b", "c"]);
        store.insert_at(entry("a"), 3);

        assert_eq!(urls(&store), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_duplicate_at_insert_row_is_not_rechecked() {
        let mut store = store_of(&["a", "b"]);
        store.insert_at(entry("a"), 0);

        // Forward scan finds nothing past row 0, backward scan does not run
        assert_eq!(urls(&store), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_third_copy_survives_single_match_passes() {
        let mut store = store_of(&["a", "b"]);
        store.insert_at(entry("a"), 0);
        assert_eq!(urls(&store), vec!["a", "a", "b"]);

        // Backward scan removes only the nearest copy before row 3
        store.insert_at(entry("a"), 3);
        assert_eq!(urls(&store), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_dedup_needs_full_value_match() {
        let mut store = store_of(&["a"]);
        let mut played = entry("a");
        played.last_time = 42;
        store.insert_at(played, 1);

        assert_eq!(store.len(), 2);
        assert_eq!(store.entry_for("a").last_time, 42);
    }

    #[test]
    fn test_insert_past_end_is_noop() {
        let mut store = store_of(&["a"]);
        store.insert_at(entry("b"), 5);
        assert_eq!(urls(&store), vec!["a"]);
    }

    #[test]
    fn test_entry_at_out_of_range_is_empty() {
        let store = store_of(&["a"]);
        assert!(store.entry_at(1).is_empty());
        assert!(PlaylistStore::new().entry_at(0).is_empty());
    }

    #[test]
    fn test_entry_for_prefers_highest_index() {
        let mut store = PlaylistStore::new();
        store.insert_at(PlaylistEntry::new("a", "first", 0, 0), 0);
        store.insert_at(PlaylistEntry::new("a", "second", 0, 0), 1);

        assert_eq!(store.entry_for("a").title, "second");
        assert_eq!(store.index_of_url("a"), Some(1));
        assert!(store.entry_for("missing").is_empty());
    }

    #[test]
    fn test_set_at_replaces_in_place() {
        let mut store = store_of(&["a", "b"]);
        store.set_at(entry("c"), 1);
        store.set_at(entry("d"), 2);

        assert_eq!(urls(&store), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_by_url_removes_all() {
        let mut store = PlaylistStore::new();
        store.insert_at(entry("x"), 0);
        store.insert_at(PlaylistEntry::new("y", "1", 0, 0), 1);
        store.insert_at(PlaylistEntry::new("y", "2", 0, 0), 2);

        assert_eq!(store.remove_by_url("y"), 2);
        assert_eq!(urls(&store), vec!["x"]);
    }

    #[test]
    fn test_remove_range_clamps() {
        let mut store = store_of(&["a", "b", "c"]);
        store.remove_range(1, 10);
        assert_eq!(urls(&store), vec!["a"]);

        store.remove_range(5, 1);
        store.remove_at(3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = store_of(&["a", "b"]);
        store.clear();
        assert_eq!(store.len(), 0);
        store.clear();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_events_follow_mutations() {
        let mut store = store_of(&["a", "b"]);
        let rx = store.subscribe();

        store.insert_at(entry("c"), 1);
        store.remove_at(0);
        store.clear();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                PlaylistEvent::Inserted { row: 1 },
                PlaylistEvent::Changed { row: 1 },
                PlaylistEvent::Removed { start: 0, count: 1 },
                PlaylistEvent::Removed { start: 0, count: 2 },
            ]
        );
    }

    #[test]
    fn test_clear_on_empty_emits_nothing() {
        let mut store = PlaylistStore::new();
        let rx = store.subscribe();
        store.clear();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut store = PlaylistStore::new();
        drop(store.subscribe());
        let rx = store.subscribe();

        store.insert_by_url("a", 0);
        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn test_activate_emits_url() {
        let mut store = store_of(&["a", "b"]);
        let rx = store.subscribe();

        assert_eq!(store.activate(1).as_deref(), Some("b"));
        assert_eq!(store.activate(7), None);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![PlaylistEvent::Activated { url: "b".into() }]);
        assert!(!events[0].is_structural());
    }
}
