use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(unix)]
use std::{fs, os::unix::fs::PermissionsExt};

use tempfile::NamedTempFile;

use crate::error::{IndexError, Result};
use crate::indexer::model::Index;

/// Mode of the finished index; temporary files start out owner-only.
#[cfg(unix)]
const INDEX_MODE: u32 = 0o644;

/// Serialize `index` as pretty JSON to `output`, returning its size in bytes.
///
/// The JSON goes to a temporary file next to `output` and is renamed into
/// place only once fully written, so a failed run leaves no artifact.
pub fn write_index(index: &Index, output: &Path) -> Result<u64> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut buf = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut buf, index)?;
        buf.write_all(b"\n")?;
        buf.flush()?;
    }
    #[cfg(unix)]
    tmp.as_file().set_permissions(fs::Permissions::from_mode(INDEX_MODE))?;
    tmp.as_file().sync_all()?;
    let file = tmp.persist(output).map_err(|e| IndexError::Persist {
        path: output.to_path_buf(),
        source: e.error,
    })?;
    Ok(file.metadata()?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::model::IndexMode;
    use std::fs;

    #[test]
    fn writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join(".astra-index.json");
        let index = Index::new(IndexMode::Lightweight, vec!["/w".to_string()]);

        let size = write_index(&index, &out).unwrap();
        assert_eq!(size, fs::metadata(&out).unwrap().len());

        let back: Index = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(back.mode, IndexMode::Lightweight);
        assert_eq!(back.folders, vec!["/w"]);
    }

    #[cfg(unix)]
    #[test]
    fn index_is_readable_by_others() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.json");
        write_index(&Index::new(IndexMode::Full, Vec::new()), &out).unwrap();
        let mode = fs::metadata(&out).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("index.json");
        let index = Index::new(IndexMode::Full, Vec::new());

        assert!(write_index(&index, &out).is_err());
        assert!(!out.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn target_directory_is_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("taken");
        fs::create_dir(&out).unwrap();
        let index = Index::new(IndexMode::Full, Vec::new());

        let err = write_index(&index, &out).unwrap_err();
        assert!(matches!(err, IndexError::Persist { .. }));
        // Only the pre-existing directory remains; the temp file is gone.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(out.is_dir());
    }
}
