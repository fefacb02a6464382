// benchpost - core/mod.rs
//
// Core business logic layer: discovery, parsing, export and the data model.
// Must NOT depend on: app or platform.

pub mod discovery;
pub mod export;
pub mod model;
pub mod parser;
