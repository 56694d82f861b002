// VcfSheet - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error names the file it concerns and keeps the underlying cause
// reachable through `source()`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all VcfSheet operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum VcfSheetError {
    /// Loading a vCard file failed.
    Ingest(IngestError),

    /// Writing an export failed or there was nothing to write.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl VcfSheetError {
    /// True when an export was skipped because no contact matched.
    pub fn is_nothing_to_export(&self) -> bool {
        matches!(self, Self::Export(e) if e.is_nothing_to_export())
    }
}

impl fmt::Display for VcfSheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for VcfSheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ingest(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// The vCard decoder rejected the cleaned file content.
///
/// `card` is the 1-based position of the card being decoded when the
/// failure occurred; `reason` is the decoder's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub card: usize,
    pub reason: String,
}

impl DecodeError {
    pub fn new(card: usize, reason: impl Into<String>) -> Self {
        Self {
            card,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card {}: {}", self.card, self.reason)
    }
}

impl std::error::Error for DecodeError {}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a vCard file.
#[derive(Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    FileAccess { path: PathBuf, source: io::Error },

    /// The file was read but its content is not a valid vCard stream.
    Parse { path: PathBuf, source: DecodeError },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse vCard '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl From<IngestError> for VcfSheetError {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// The filtered contact set is empty; no file was written.
    NothingToExport,

    /// The table does not fit in a single worksheet.
    TooLarge {
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },

    /// I/O error writing or finalising the export file.
    Io { path: PathBuf, source: io::Error },

    /// Workbook construction or serialisation failed.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },
}

impl ExportError {
    /// True for the "nothing to export" outcome, which callers usually report
    /// as information rather than as a failure.
    pub fn is_nothing_to_export(&self) -> bool {
        matches!(self, Self::NothingToExport)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToExport => write!(f, "Nothing to export: no contacts match"),
            Self::TooLarge {
                rows,
                columns,
                max_rows,
                max_columns,
            } => write!(
                f,
                "Table of {rows} rows x {columns} columns exceeds the worksheet \
                 limit of {max_rows} x {max_columns}. Narrow the search to reduce it."
            ),
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "XLSX export error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for VcfSheetError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for VcfSheetError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for VcfSheet results.
pub type Result<T> = std::result::Result<T, VcfSheetError>;
