//! Downloaded files

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FinanzError, FinanzResult};

/// Filename used when neither the caller nor the server names the file
pub const DEFAULT_DOWNLOAD_NAME: &str = "download";

/// Raw bytes fetched from a download endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Pick the filename: explicit, then `Content-Disposition`, then the default
    pub fn new(bytes: Vec<u8>, explicit: Option<&str>, content_disposition: Option<&str>) -> Self {
        let filename = explicit
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| content_disposition.and_then(filename_from_content_disposition))
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string());

        Self { filename, bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the file into `dir`, returning the full path.
    ///
    /// Only the final path component of the filename is used.
    pub fn save_to(&self, dir: &Path) -> FinanzResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| {
            FinanzError::Export(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let name = Path::new(&self.filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string());
        let path = dir.join(name);

        fs::write(&path, &self.bytes).map_err(|e| {
            FinanzError::Export(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(path)
    }
}

/// Extract `filename=...` from a `Content-Disposition` header.
///
/// The value may be quoted or bare; all quote characters are stripped.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let start = header.find("filename")?;
    let rest = &header[start + "filename".len()..];

    // Anything up to '=' belongs to the parameter name (e.g. `filename*`)
    let eq = rest.find(|c: char| c == '=' || c == ';' || c == '\n')?;
    if !rest[eq..].starts_with('=') {
        return None;
    }
    let value = rest[eq + 1..].trim_start();

    let raw = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &value[1..];
            match inner.find(quote) {
                Some(end) => &inner[..end],
                None => inner,
            }
        }
        _ => value.split([';', '\n']).next().unwrap_or(""),
    };

    let name: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
