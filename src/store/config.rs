//! Store configuration

use std::path::PathBuf;

/// Configuration for a playlist store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backing file (None = no persistence)
    pub save_file: Option<PathBuf>,

    /// Maximum number of entries (None = unbounded)
    pub max_size: Option<usize>,

    /// Save to the backing file when the store is dropped
    pub save_on_drop: bool,
}

impl StoreConfig {
    /// Create an unbounded, non-persistent configuration
    pub fn new() -> Self {
        Self {
            save_file: None,
            max_size: None,
            save_on_drop: true,
        }
    }

    /// Set the backing file
    pub fn with_save_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_file = normalize_save_file(path.into());
        self
    }

    /// Set the maximum size (0 or less disables the bound)
    pub fn with_max_size(mut self, max_size: i64) -> Self {
        self.max_size = normalize_max_size(max_size);
        self
    }

    /// Enable or disable saving on drop
    pub fn with_save_on_drop(mut self, enabled: bool) -> Self {
        self.save_on_drop = enabled;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An empty path means "no persistence"
pub(crate) fn normalize_save_file(path: PathBuf) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

pub(crate) fn normalize_max_size(max_size: i64) -> Option<usize> {
    if max_size <= 0 {
        None
    } else {
        Some(usize::try_from(max_size).unwrap_or(usize::MAX))
    }
}
