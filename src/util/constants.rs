// VcfSheet - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "VcfSheet";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "VcfSheet";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Contact table layout
// =============================================================================

/// Header of the first column in every table and export.
pub const NAME_HEADER: &str = "Name";

/// Prefix of the numbered phone columns (`Phone1`, `Phone2`, ...).
pub const PHONE_HEADER_PREFIX: &str = "Phone";

/// The table always carries at least this many phone columns, even when no
/// contact has a number.
pub const MIN_PHONE_COLUMNS: usize = 1;

// =============================================================================
// vCard decoding
// =============================================================================

/// Property holding the formatted display name.
pub const FORMATTED_NAME_PROPERTY: &str = "FN";

/// Property holding a telephone number.
pub const PHONE_PROPERTY: &str = "TEL";

/// Property prefix whose values are dropped before decoding.
pub const PHOTO_PROPERTY_PREFIX: &str = "PHOTO";

/// Component name of a contact card.
pub const VCARD_COMPONENT: &str = "VCARD";

// =============================================================================
// Export
// =============================================================================

/// Default worksheet name in exported workbooks.
pub const DEFAULT_SHEET_NAME: &str = "Contacts";

/// Longest worksheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel rejects in worksheet names.
pub const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Default file name offered by the save dialog.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "contacts.xlsx";

/// Excel's per-sheet row limit (header row included).
pub const MAX_XLSX_ROWS: usize = 1_048_576;

/// Excel's per-sheet column limit.
pub const MAX_XLSX_COLUMNS: usize = 16_384;

/// Width (in character units) applied to the Name column of exported sheets.
pub const NAME_COLUMN_WIDTH: f64 = 28.0;

/// Width applied to each phone column of exported sheets.
pub const PHONE_COLUMN_WIDTH: f64 = 18.0;

// =============================================================================
// UI
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum user-configurable font size.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable font size.
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [900.0, 600.0];

/// Smallest window size the user can resize to.
pub const WINDOW_MIN_SIZE: [f32; 2] = [640.0, 400.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Configuration file name, looked up next to the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session file name inside the platform data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Extensions offered by the open dialog.
pub const VCF_EXTENSIONS: &[&str] = &["vcf", "vcard"];
