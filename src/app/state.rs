// VcfSheet - app/state.rs
//
// Application state: the loaded contact set, the current search and its
// filtered view, dialog folders, and status text.
// Owned by the eframe::App implementation; every mutation happens on the UI
// thread in response to one user action.

use crate::app::convert::{self, ExportOptions};
use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::core::filter;
use crate::core::model::{Contact, ContactTable};
use crate::platform::config::AppConfig;
use crate::util::error::ExportError;
use std::path::{Path, PathBuf};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Validated configuration.
    pub config: AppConfig,

    /// File the current contacts were loaded from.
    pub source_path: Option<PathBuf>,

    /// All contacts from the last successful load.
    pub contacts: Vec<Contact>,

    /// Search box text, exactly as typed.
    pub search_query: String,

    /// Indices into `contacts` matching `search_query`.
    pub filtered_indices: Vec<usize>,

    /// Projection of the filtered view, rebuilt whenever the view changes.
    pub table: ContactTable,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether `status_message` describes a failure.
    pub status_is_error: bool,

    /// Destination of the last successful export.
    pub last_export: Option<PathBuf>,

    /// Folder the open dialog starts in.
    pub last_open_dir: Option<PathBuf>,

    /// Folder the save dialog starts in.
    pub last_export_dir: Option<PathBuf>,

    /// Where the session is persisted (None disables persistence).
    pub session_file: Option<PathBuf>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// File chosen in the open dialog, consumed by the frame loop.
    pub pending_open: Option<PathBuf>,

    /// Destination chosen in the save dialog, consumed by the frame loop.
    pub pending_export: Option<PathBuf>,
}

impl AppState {
    /// Create initial state with no contacts loaded.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            source_path: None,
            contacts: Vec::new(),
            search_query: String::new(),
            filtered_indices: Vec::new(),
            table: ContactTable::from_contacts(std::iter::empty::<&Contact>()),
            status_message: "No vCard file selected.".to_string(),
            status_is_error: false,
            last_export: None,
            last_open_dir: None,
            last_export_dir: None,
            session_file: None,
            show_about: false,
            pending_open: None,
            pending_export: None,
        }
    }

    /// Enable session persistence at `path` and restore what it holds.
    pub fn attach_session(&mut self, path: PathBuf) {
        if let Some(data) = session::load(&path) {
            self.last_open_dir = data.last_open_dir;
            self.last_export_dir = data.last_export_dir;
        }
        self.session_file = Some(path);
    }

    /// Persist the dialog folders. Failures are logged, never surfaced.
    pub fn save_session(&self) {
        let Some(ref path) = self.session_file else {
            return;
        };
        let data = SessionData {
            version: SESSION_VERSION,
            last_open_dir: self.last_open_dir.clone(),
            last_export_dir: self.last_export_dir.clone(),
        };
        if let Err(e) = session::save(&data, path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    /// Load `path`, replacing the current contact set.
    ///
    /// The search text is kept and re-applied to the new set. On failure the
    /// previous set is cleared and the error is shown in the status bar.
    pub fn load_file(&mut self, path: &Path) {
        self.last_open_dir = path.parent().map(Path::to_path_buf);
        match convert::ingest(path) {
            Ok(contacts) => {
                let file_name = display_name(path);
                self.set_status(
                    format!("Loaded {file_name} ({} contacts)", contacts.len()),
                    false,
                );
                self.contacts = contacts;
                self.source_path = Some(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!(error = %e, "vCard load failed");
                self.contacts.clear();
                self.source_path = None;
                self.set_status(format!("Failed to load vCard file: {e}"), true);
            }
        }
        self.last_export = None;
        self.apply_filters();
        self.save_session();
    }

    /// Replace the search text and refresh the view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.apply_filters();
    }

    /// Recompute the filtered view and its table from the full set.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::matching_indices(&self.contacts, &self.search_query);
        self.table = ContactTable::from_contacts(
            self.filtered_indices
                .iter()
                .filter_map(|&i| self.contacts.get(i)),
        );
    }

    /// Copies of the contacts in the current view, in order.
    pub fn filtered_contacts(&self) -> Vec<Contact> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.contacts.get(i))
            .cloned()
            .collect()
    }

    /// True when the current view has at least one contact.
    pub fn can_export(&self) -> bool {
        !self.filtered_indices.is_empty()
    }

    /// Options for the next export, from configuration.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.config.sheet_name.clone(),
            format: None,
        }
    }

    /// Export the current view to `dest` and report the outcome in the
    /// status bar.
    pub fn export_to(&mut self, dest: &Path) -> Result<usize, ExportError> {
        let result = convert::export(&self.filtered_contacts(), dest, &self.export_options());
        match result {
            Ok(rows) => {
                self.set_status(
                    format!("Exported {rows} contacts to {}", dest.display()),
                    false,
                );
                self.last_export = Some(dest.to_path_buf());
                self.last_export_dir = dest.parent().map(Path::to_path_buf);
                self.save_session();
            }
            Err(ref e) if e.is_nothing_to_export() => {
                self.set_status("No contacts to export.", false);
            }
            Err(ref e) => {
                tracing::warn!(error = %e, "Export failed");
                self.set_status(format!("Export failed: {e}"), true);
            }
        }
        result
    }

    /// File name of the loaded source, for the toolbar.
    pub fn source_label(&self) -> Option<String> {
        self.source_path.as_deref().map(display_name)
    }

    /// Summary line for the status bar's right-hand side.
    pub fn count_label(&self) -> Option<String> {
        if self.contacts.is_empty() {
            None
        } else {
            Some(format!(
                "{}/{} contacts",
                self.filtered_indices.len(),
                self.contacts.len()
            ))
        }
    }

    fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = message.into();
        self.status_is_error = is_error;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
