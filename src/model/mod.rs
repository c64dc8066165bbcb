//! Playlist data model
//!
//! Plain value types shared by the store and the save file codec.

mod entry;

pub use entry::{default_title, PlaylistEntry};
