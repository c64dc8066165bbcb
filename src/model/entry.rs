use serde::{Deserialize, Serialize};

/// One playable item in a playlist
///
/// Equality compares every field; lookups by `url` go through the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Local path or URI, unique within a playlist
    pub url: String,

    /// Display name
    pub title: String,

    /// Playback length (0 = unknown)
    pub duration: i64,

    /// Last playback position
    pub last_time: i64,
}

impl PlaylistEntry {
    /// Create an entry with explicit fields
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        duration: i64,
        last_time: i64,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            duration,
            last_time,
        }
    }

    /// Create an entry for a bare URL or file path
    ///
    /// Duration and last position start at 0, the title is derived from the URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let title = default_title(&url);
        Self {
            url,
            title,
            duration: 0,
            last_time: 0,
        }
    }

    /// An entry with an empty url is what failed lookups return
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Derive a display title from a URL
///
/// Local paths and `file://` URIs use the file name portion; any other
/// scheme keeps the full URL.
pub fn default_title(url: &str) -> String {
    if url.contains("://") && !url.starts_with("file://") {
        return url.to_string();
    }

    let name = file_name(url);
    if url.starts_with("file://") {
        // Percent-encoded file URIs get a readable title
        match urlencoding::decode(name) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => name.to_string(),
        }
    } else {
        name.to_string()
    }
}

/// Everything after the last `/` (empty for a trailing separator)
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_plain_file_name() {
        assert_eq!(default_title("a.mp3"), "a.mp3");
    }

    #[test]
    fn test_title_from_local_path() {
        assert_eq!(default_title("/home/me/Music/Song.flac"), "Song.flac");
    }

    #[test]
    fn test_title_from_file_uri() {
        assert_eq!(default_title("file:///music/track%2001.mp3"), "track 01.mp3");
    }

    #[test]
    fn test_title_keeps_remote_url() {
        let url = "http://radio.example.org/stream.mp3";
        assert_eq!(default_title(url), url);
    }

    #[test]
    fn test_title_trailing_separator() {
        assert_eq!(default_title("/music/"), "");
    }

    #[test]
    fn test_from_url_defaults() {
        let entry = PlaylistEntry::from_url("/tmp/x.ogg");
        assert_eq!(entry.url, "/tmp/x.ogg");
        assert_eq!(entry.title, "x.ogg");
        assert_eq!(entry.duration, 0);
        assert_eq!(entry.last_time, 0);
    }

    #[test]
    fn test_equality_is_by_all_fields() {
        let a = PlaylistEntry::new("a.mp3", "A", 10, 0);
        let b = PlaylistEntry::new("a.mp3", "A", 10, 5);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(PlaylistEntry::default().is_empty());
    }
}
