//! JSON documents in the data directory
//!
//! `config.json` and `session.json` are small documents rewritten as a whole.
//! A write goes to a sibling temp file which then replaces the document, so a
//! crash leaves either the old or the new contents. The session holds tokens
//! and is written with [`Access::OwnerOnly`].

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanzError;

/// Who may read a written document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Default permissions for new files
    Shared,
    /// `0600` on Unix; default permissions elsewhere
    OwnerOnly,
}

fn storage_error(action: &str, path: &Path, e: impl std::fmt::Display) -> FinanzError {
    FinanzError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// `.session.json.tmp` next to `session.json`
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Load a document; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, FinanzError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };

    if contents.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&contents).map_err(|e| storage_error("parse", path, e))
}

fn create_temp(path: &Path, access: Access) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    if access == Access::OwnerOnly {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = access;

    options.open(path)
}

/// Replace the document at `path` with `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanzError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    write_document(path.as_ref(), data, Access::Shared)
}

/// Replace the document at `path`, readable by the owner only
pub fn write_private_json<T, P>(path: P, data: &T) -> Result<(), FinanzError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    write_document(path.as_ref(), data, Access::OwnerOnly)
}

fn write_document<T: Serialize + ?Sized>(
    path: &Path,
    data: &T,
    access: Access,
) -> Result<(), FinanzError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_error("create", parent, e))?;
    }

    let temp = temp_path(path);
    let result = (|| {
        let file = create_temp(&temp, access).map_err(|e| storage_error("create", &temp, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_error("serialize", path, e))?;
        writer.write_all(b"\n").map_err(|e| storage_error("write", &temp, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| storage_error("write", &temp, e.error()))?;
        file.sync_all().map_err(|e| storage_error("sync", &temp, e))?;
        fs::rename(&temp, path).map_err(|e| storage_error("replace", path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

/// Delete a document, treating a missing file as success
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<(), FinanzError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(storage_error("remove", path, e)),
        _ => Ok(()),
    }
}
