// VcfSheet - app/convert.rs
//
// The three operations the presentation shell calls: load a vCard file,
// filter the loaded set, export a set. Each call is self-contained and
// leaves its inputs untouched; the caller owns all state.

use crate::core::export::{render, ExportFormat};
use crate::core::ingest::decode_contacts;
use crate::core::model::{Contact, ContactTable};
use crate::platform::{config, fs};
use crate::util::constants;
use crate::util::error::{ExportError, IngestError, Result as VcfSheetResult};
use std::path::Path;

pub use crate::core::filter::filter;

/// Export settings that do not depend on the contact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Worksheet name for XLSX output.
    pub sheet_name: String,
    /// Forced output format; `None` picks it from the destination extension.
    pub format: Option<ExportFormat>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: constants::DEFAULT_SHEET_NAME.to_string(),
            format: None,
        }
    }
}

/// Read and decode the vCard file at `path`.
///
/// A file with no cards is a successful, empty result. Unreadable files
/// and malformed content are distinct errors.
pub fn ingest(path: &Path) -> Result<Vec<Contact>, IngestError> {
    let bytes = fs::read_bytes(path).map_err(|e| IngestError::FileAccess {
        path: path.to_path_buf(),
        source: e,
    })?;

    let contacts = decode_contacts(&bytes).map_err(|e| IngestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        contacts = contacts.len(),
        "vCard file loaded"
    );
    Ok(contacts)
}

/// Write `contacts` to `dest` as a single-sheet workbook (or CSV).
///
/// Returns the number of contact rows written. An empty set returns
/// `ExportError::NothingToExport` without touching the filesystem. The
/// destination is replaced atomically: on failure it is left as it was.
pub fn export(
    contacts: &[Contact],
    dest: &Path,
    options: &ExportOptions,
) -> Result<usize, ExportError> {
    if contacts.is_empty() {
        tracing::info!(path = %dest.display(), "Export skipped: no contacts to export");
        return Err(ExportError::NothingToExport);
    }

    let table = ContactTable::from_contacts(contacts);
    let format = options.format.unwrap_or_else(|| ExportFormat::from_path(dest));
    let bytes = render(&table, format, &options.sheet_name, dest)?;

    fs::write_atomic(dest, &bytes).map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        path = %dest.display(),
        format = format.label(),
        rows = table.rows.len(),
        phone_columns = table.phone_columns(),
        "Export complete"
    );
    Ok(table.rows.len())
}

/// Outcome of a successful `convert_file` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Contacts decoded from the source file.
    pub loaded: usize,
    /// Rows written to the destination.
    pub exported: usize,
}

/// Load `source`, keep the contacts matching `query`, and export them to
/// `dest` in one step. Used by the windowless `--export` mode.
///
/// The sheet name is validated before the source is read.
pub fn convert_file(
    source: &Path,
    query: &str,
    dest: &Path,
    options: &ExportOptions,
) -> VcfSheetResult<ConvertSummary> {
    config::validate_sheet_name(&options.sheet_name)?;
    let contacts = ingest(source)?;
    let filtered = filter(&contacts, query);
    let exported = export(&filtered, dest, options)?;
    Ok(ConvertSummary {
        loaded: contacts.len(),
        exported,
    })
}
