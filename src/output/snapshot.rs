//! JSON snapshot persistence
//!
//! Records are persisted twice: once per catalog page as a checkpoint
//! (`manga_data_page{N}.json`) and once at the end of the run as the
//! deduplicated aggregate. Snapshots are pretty-printed JSON arrays with
//! international text kept verbatim, never ASCII-escaped.

use crate::model::MangaRecord;
use crate::SnapshotError;
use std::fs;
use std::path::{Path, PathBuf};

const CHECKPOINT_PREFIX: &str = "manga_data_page";

/// Writes a record sequence to `path` as pretty-printed JSON
///
/// Creates the parent directory if it does not exist. An I/O failure is
/// returned to the caller; it never invalidates in-memory state.
pub fn write_snapshot(records: &[MangaRecord], path: &Path) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;

    tracing::info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Loads a record sequence from a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Vec<MangaRecord>, SnapshotError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Returns the checkpoint path for one catalog page
pub fn checkpoint_path(directory: &Path, page: u32) -> PathBuf {
    directory.join(format!("{}{}.json", CHECKPOINT_PREFIX, page))
}

/// Scans a directory for existing page checkpoints
///
/// Returns `(page, path)` pairs sorted by page number. Files that do not
/// follow the checkpoint naming scheme are ignored. A missing directory
/// yields an empty list, since a first run has nothing to resume from.
pub fn find_checkpoints(directory: &Path) -> Result<Vec<(u32, PathBuf)>, SnapshotError> {
    let mut checkpoints = Vec::new();

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(checkpoints),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        if let Some(page) = parse_checkpoint_page(name) {
            checkpoints.push((page, entry.path()));
        }
    }

    checkpoints.sort_by_key(|(page, _)| *page);
    Ok(checkpoints)
}

/// Parses the page number out of a checkpoint file name
fn parse_checkpoint_page(name: &str) -> Option<u32> {
    name.strip_prefix(CHECKPOINT_PREFIX)?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MangaStub;
    use tempfile::tempdir;

    fn record(title: &str, url: &str) -> MangaRecord {
        MangaRecord::from_stub(MangaStub {
            title: title.to_string(),
            url: url.to_string(),
            cover_url: None,
        })
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let records = vec![
            record("A", "https://example.com/a"),
            record("B", "https://example.com/b"),
        ];

        write_snapshot(&records, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(records, loaded);
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("snapshot.json");

        write_snapshot(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_non_ascii_text_is_kept_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let records = vec![record("ワンピース", "https://example.com/a")];
        write_snapshot(&records, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("ワンピース"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn test_checkpoint_path_naming() {
        let path = checkpoint_path(Path::new("/data"), 17);
        assert_eq!(path, PathBuf::from("/data/manga_data_page17.json"));
    }

    #[test]
    fn test_find_checkpoints_sorted() {
        let dir = tempdir().unwrap();

        for page in [3u32, 1, 12] {
            write_snapshot(&[], &checkpoint_path(dir.path(), page)).unwrap();
        }
        // Files that aren't checkpoints are ignored
        std::fs::write(dir.path().join("manga_data.json"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let found = find_checkpoints(dir.path()).unwrap();
        let pages: Vec<u32> = found.iter().map(|(p, _)| *p).collect();
        assert_eq!(pages, vec![1, 3, 12]);
    }

    #[test]
    fn test_find_checkpoints_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(find_checkpoints(&missing).unwrap().is_empty());
    }

    #[test]
    fn test_parse_checkpoint_page() {
        assert_eq!(parse_checkpoint_page("manga_data_page42.json"), Some(42));
        assert_eq!(parse_checkpoint_page("manga_data.json"), None);
        assert_eq!(parse_checkpoint_page("manga_data_pageX.json"), None);
        assert_eq!(parse_checkpoint_page("manga_data_page42.txt"), None);
    }
}
