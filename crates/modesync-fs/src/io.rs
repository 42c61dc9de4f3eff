//! Atomic, locked writes for configuration files

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::checksum::compute_bytes_checksum;
use crate::{Error, NormalizedPath, Result};

/// What a write call actually did on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or its content replaced.
    Written,
    /// The file already held identical content; nothing was touched.
    Unchanged,
}

/// Sidecar file whose exclusive lock serializes writers within one directory.
pub const LOCK_FILE_NAME: &str = ".modesync.lock";

/// Write `content` to `path` atomically.
///
/// Writers in the same directory take an exclusive advisory lock on
/// [`LOCK_FILE_NAME`] for the whole write. The bytes go to a temporary
/// sibling file that is renamed over the destination; the temporary file is
/// removed again if any step fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native = path.to_native();
    let dir = match native.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let lock_path = dir.join(LOCK_FILE_NAME);
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    lock_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native.clone(),
    })?;

    let replaced = replace_via_temp(&native, content);
    let unlocked = FileExt::unlock(&lock_file);
    replaced?;
    unlocked.map_err(|_| Error::LockFailed { path: native })
}

fn replace_via_temp(native: &Path, content: &[u8]) -> Result<()> {
    let temp_name = format!(
        ".{}.{}.tmp",
        native
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native.with_file_name(&temp_name);

    let result = write_synced(&temp_path, content)
        .and_then(|()| fs::rename(&temp_path, native).map_err(|e| Error::io(native, e)));
    if result.is_err()
        && temp_path.exists()
        && let Err(e) = fs::remove_file(&temp_path)
    {
        tracing::warn!(path = %temp_path.display(), error = %e, "could not remove temporary file");
    }
    result
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(content).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))
}

/// Write `content` unless the file already contains exactly these bytes.
pub fn write_if_changed(path: &NormalizedPath, content: &[u8]) -> Result<WriteOutcome> {
    if path.is_file() {
        let native = path.to_native();
        let existing = fs::read(&native).map_err(|e| Error::io(&native, e))?;
        if compute_bytes_checksum(&existing) == compute_bytes_checksum(content) {
            tracing::debug!(path = %path, "content unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
    }
    write_atomic(path, content)?;
    Ok(WriteOutcome::Written)
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(&native, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("nested/sync/a.yml");

        write_atomic(&path, b"id: a\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "id: a\n");
    }

    fn entry_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn write_atomic_leaves_only_target_and_lock() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("a.yml");

        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        assert_eq!(
            entry_names(dir.path()),
            vec![LOCK_FILE_NAME.to_string(), "a.yml".to_string()]
        );
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a.yml/occupied")).unwrap();
        let path = NormalizedPath::new(dir.path()).join("a.yml");

        assert!(write_atomic(&path, b"one").is_err());

        assert_eq!(
            entry_names(dir.path()),
            vec![LOCK_FILE_NAME.to_string(), "a.yml".to_string()]
        );
    }

    #[test]
    fn write_waits_for_directory_lock() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("a.yml");
        let held = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.path().join(LOCK_FILE_NAME))
            .unwrap();
        held.lock_exclusive().unwrap();

        let writer = {
            let path = path.clone();
            std::thread::spawn(move || write_atomic(&path, b"late"))
        };
        std::thread::sleep(std::time::Duration::from_millis(200));
        assert!(!path.is_file());

        FileExt::unlock(&held).unwrap();
        writer.join().unwrap().unwrap();
        assert_eq!(read_text(&path).unwrap(), "late");
    }

    #[test]
    fn write_if_changed_skips_identical_content() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("a.yml");

        assert_eq!(
            write_if_changed(&path, b"weight: 1\n").unwrap(),
            WriteOutcome::Written
        );
        assert_eq!(
            write_if_changed(&path, b"weight: 1\n").unwrap(),
            WriteOutcome::Unchanged
        );
        assert_eq!(
            write_if_changed(&path, b"weight: 2\n").unwrap(),
            WriteOutcome::Written
        );
        assert_eq!(read_text(&path).unwrap(), "weight: 2\n");
    }

    #[test]
    fn read_text_reports_path_on_missing_file() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("missing.yml");

        let err = read_text(&path).unwrap_err();
        assert!(err.to_string().contains("missing.yml"));
    }
}
