// VcfSheet - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, regex, serialisation and spreadsheet writers.
// Must NOT depend on: ui, platform, app, or touch the filesystem directly.

pub mod export;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod table;
pub mod text;
pub mod vcard;
