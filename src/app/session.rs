// VcfSheet - app/session.rs
//
// Session persistence: remember the folders last used by the open and save
// dialogs between application restarts.
//
// - Saved atomically (temp file + rename), so a crash during save never
//   corrupts the previous session.
// - Load errors are logged and discarded; the app simply starts fresh.
// - Contacts and search text are never persisted.

use crate::platform::fs;
use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Complete persistent session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Folder the open dialog starts in.
    #[serde(default)]
    pub last_open_dir: Option<PathBuf>,

    /// Folder the save dialog starts in.
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically.
///
/// Creates parent directories as needed. Returns a descriptive error string
/// suitable for a tracing warn! call.
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create session directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    fs::write_atomic(path, json.as_bytes())
        .map_err(|e| format!("failed to write session file '{}': {e}", path.display()))?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch).
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed, starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch, starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}
