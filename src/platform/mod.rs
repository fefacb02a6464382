// benchpost - platform/mod.rs
//
// Platform layer: config file loading and file handles.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
