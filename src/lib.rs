// benchpost - lib.rs
//
// Library entry point, exposing all modules for integration testing.
// The binary in `main.rs` only wires CLI, config and logging around
// `app::aggregate::run`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
