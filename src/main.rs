// VcfSheet - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Headless export when --export is given
// 4. eframe GUI launch otherwise

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can use `crate::app::...`, `crate::core::...` etc.
pub use vcfsheet::app;
pub use vcfsheet::core;
pub use vcfsheet::platform;
pub use vcfsheet::ui;
pub use vcfsheet::util;

use app::convert::{self, ExportOptions};
use clap::Parser;
use platform::config::{AppConfig, PlatformPaths};
use std::path::{Path, PathBuf};

/// Headless exit code: export written.
const EXIT_OK: i32 = 0;
/// Headless exit code: load or export failed.
const EXIT_ERROR: i32 = 1;
/// Headless exit code: no contact matched, nothing written.
const EXIT_NOTHING_TO_EXPORT: i32 = 2;

/// VcfSheet: turn a vCard file into a searchable contact spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "vcfsheet", version, about)]
struct Cli {
    /// vCard file to load at startup.
    path: Option<PathBuf>,

    /// Initial name search (case-insensitive substring).
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Export the (filtered) contacts to this file and exit without opening
    /// a window. `.csv` writes CSV; anything else writes an Excel workbook.
    #[arg(short = 'e', long = "export", requires = "path")]
    export: Option<PathBuf>,

    /// Worksheet name for the exported workbook (overrides config.toml).
    #[arg(short = 's', long = "sheet-name")]
    sheet_name: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_file());

    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "VcfSheet starting"
    );

    if let Some(ref dest) = cli.export {
        let Some(ref source) = cli.path else {
            eprintln!("Error: --export needs a vCard file to read");
            std::process::exit(EXIT_ERROR);
        };
        let code = run_headless(&cli, &config, source, dest);
        std::process::exit(code);
    }

    let mut state = app::state::AppState::new(config);
    state.attach_session(app::session::session_path(&platform_paths.data_dir));
    if let Some(ref sheet_name) = cli.sheet_name {
        match platform::config::validate_sheet_name(sheet_name) {
            Ok(()) => state.config.sheet_name = sheet_name.clone(),
            Err(e) => tracing::warn!(error = %e, "Ignoring --sheet-name"),
        }
    }
    if let Some(ref query) = cli.query {
        state.set_query(query.clone());
    }
    if let Some(ref path) = cli.path {
        state.load_file(path);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(util::constants::WINDOW_SIZE)
            .with_min_inner_size(util::constants::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::VcfSheetApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch VcfSheet GUI: {e}");
        std::process::exit(EXIT_ERROR);
    }
}

/// Load, filter, and export without a window. Returns the process exit code.
fn run_headless(cli: &Cli, config: &AppConfig, source: &Path, dest: &Path) -> i32 {
    let options = ExportOptions {
        sheet_name: cli
            .sheet_name
            .clone()
            .unwrap_or_else(|| config.sheet_name.clone()),
        format: None,
    };
    let query = cli.query.as_deref().unwrap_or("");

    match convert::convert_file(source, query, dest, &options) {
        Ok(summary) => {
            println!(
                "Exported {} of {} contacts to {}",
                summary.exported,
                summary.loaded,
                dest.display()
            );
            EXIT_OK
        }
        Err(e) if e.is_nothing_to_export() => {
            eprintln!("No contacts to export.");
            EXIT_NOTHING_TO_EXPORT
        }
        Err(e) => {
            tracing::error!(error = %e, "Headless export failed");
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}
