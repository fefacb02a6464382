// benchpost - app/mod.rs
//
// Application layer: run orchestration.
// Dependencies: core, platform, util.

pub mod aggregate;
