// VcfSheet - app/mod.rs
//
// Application layer: orchestration, state management, session persistence.
// Dependencies: core, platform (file access, config types).
// Must NOT depend on: ui.

pub mod convert;
pub mod session;
pub mod state;
