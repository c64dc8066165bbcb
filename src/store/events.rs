//! Change notifications for views and players

/// Something that happened to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEvent {
    /// A slot was inserted at `row`
    Inserted { row: usize },

    /// The entry at `row` was replaced
    Changed { row: usize },

    /// `count` entries starting at `start` were removed
    Removed { start: usize, count: usize },

    /// The user asked to play the entry with this url
    Activated { url: String },
}

impl PlaylistEvent {
    /// Whether the event changes the shape or content of the sequence
    pub fn is_structural(&self) -> bool {
        !matches!(self, PlaylistEvent::Activated { .. })
    }
}
