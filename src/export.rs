//! Commit a finished output buffer to disk without ever leaving a partial file behind.

use crate::error::{CurveError, CurveResult};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling file the data is staged in before being renamed over `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` atomically.
///
/// The data goes to `<path>.tmp` first and is renamed over `path` once fully written.
/// On failure the staging file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CurveResult<()> {
    let staging = staging_path(path);
    let result = (|| {
        let mut file = fs::File::create(&staging)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&staging, path)
    })();

    result.map_err(|err| {
        tracing::warn!(path = %path.display(), error = %err, "atomic write failed");
        let _ = fs::remove_file(&staging);
        CurveError::export_failed(path, err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("curvedraw-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_whole_file() {
        let dir = scratch_dir("export-ok");
        let path = dir.join("out.svg");
        write_atomic(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
        assert!(!staging_path(&path).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn replaces_existing_file() {
        let dir = scratch_dir("export-replace");
        let path = dir.join("out.svg");
        fs::write(&path, "old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failure_leaves_nothing_behind() {
        let dir = scratch_dir("export-fail");
        let path = dir.join("missing").join("out.svg");
        let err = write_atomic(&path, b"<svg/>").unwrap_err();
        assert!(matches!(err, CurveError::ExportFailed { .. }));
        assert!(!path.exists());
        assert!(!staging_path(&path).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rename_failure_cleans_up_staging() {
        // a directory cannot be replaced by a file
        let dir = scratch_dir("export-dir");
        let path = dir.join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(write_atomic(&path, b"<svg/>").is_err());
        assert!(path.is_dir());
        assert!(!staging_path(&path).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn staging_is_a_sibling() {
        assert_eq!(
            staging_path(Path::new("/a/b/out.svg")),
            PathBuf::from("/a/b/out.svg.tmp")
        );
    }
}
