// VcfSheet - platform/fs.rs
//
// Filesystem helpers: whole-file reads and all-or-nothing writes.

use std::io::{self, Write};
use std::path::Path;

/// Read the full content of a file as raw bytes.
///
/// Decoding is left to the caller so malformed text never turns into an
/// I/O failure.
pub fn read_bytes(path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Write `bytes` to `path` so the destination either keeps its previous
/// state or holds the complete new content.
///
/// The data is written to a temporary file in the destination directory,
/// flushed to disk, then renamed over `path`. On any failure the temporary
/// file is removed when it is dropped.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".vcfsheet-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "File written atomically");
    Ok(())
}

/// Open the system file manager and highlight `path` within it.
///
/// The subprocess is spawned detached; any launch failure is logged at WARN
/// level but never propagated so the UI never blocks.
pub fn reveal_in_file_manager(path: &Path) {
    #[cfg(target_os = "windows")]
    {
        // `/select,<path>` must be a single argument.
        let arg = format!("/select,{}", path.display());
        if let Err(e) = std::process::Command::new("explorer").arg(arg).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal file in Explorer");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open")
            .arg("-R")
            .arg(path)
            .spawn()
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal file in Finder");
        }
    }
    #[cfg(target_os = "linux")]
    {
        let parent = path.parent().unwrap_or(path);
        if let Err(e) = std::process::Command::new("xdg-open").arg(parent).spawn() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to open parent directory in file manager"
            );
        }
    }
}
