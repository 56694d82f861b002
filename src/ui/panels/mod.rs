// VcfSheet - ui/panels/mod.rs

pub mod about;
pub mod contacts;
pub mod toolbar;
