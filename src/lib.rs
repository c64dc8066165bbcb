//! Playlist Store - ordered, deduplicated playlists with a binary save file
//!
//! The store keeps playable items in display order, moves re-inserted items
//! instead of duplicating them, optionally bounds its size by evicting from
//! the tail, and persists to a portable big-endian file. Views subscribe to
//! change events; nothing here depends on a UI toolkit.

pub mod error;
pub mod model;
pub mod persist;
pub mod source;
pub mod store;
pub mod validation;

pub use error::{PlaylistError, Result};
pub use model::PlaylistEntry;
pub use store::{PlaylistEvent, PlaylistStore, StoreConfig};
