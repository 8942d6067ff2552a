//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands write their
//! results to the writer they are given; diagnostics go through `tracing`.

pub mod derive;
pub mod menu;
pub mod newton;
pub mod secant;
