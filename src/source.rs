//! Candidate files chosen by the user
//!
//! Turns a raw selection (paths, possibly with `~`, possibly directories)
//! into the ordered list of regular files to insert.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `~` and keep existing regular files, in selection order
///
/// Directories contribute their regular files recursively, sorted by file
/// name. Anything else is skipped.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        let path = expand(path.as_ref());

        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            let before = files.len();
            files.extend(walk_dir(&path));
            log::debug!("Expanded {:?} to {} files", path, files.len() - before);
        } else {
            log::debug!("Skipping {:?}: not a file", path);
        }
    }

    files
}

fn walk_dir(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Error walking directory: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

fn expand(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_keeps_only_existing_files_in_order() {
        let dir = TempDir::new().unwrap();
        let b = dir.path().join("b.mp3");
        let a = dir.path().join("a.mp3");
        fs::write(&b, b"b").unwrap();
        fs::write(&a, b"a").unwrap();
        let missing = dir.path().join("missing.mp3");

        let files = collect_files(&[b.clone(), missing, a.clone()]);
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn test_directories_are_expanded_sorted() {
        let dir = TempDir::new().unwrap();
        let album = dir.path().join("album");
        fs::create_dir_all(album.join("disc2")).unwrap();
        fs::write(album.join("02.mp3"), b"2").unwrap();
        fs::write(album.join("01.mp3"), b"1").unwrap();
        fs::write(album.join("disc2/01.mp3"), b"3").unwrap();

        let files = collect_files(&[album.clone()]);
        assert_eq!(
            files,
            vec![
                album.join("01.mp3"),
                album.join("02.mp3"),
                album.join("disc2/01.mp3"),
            ]
        );
    }
}
