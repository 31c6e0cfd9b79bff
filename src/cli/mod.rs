//! Command-line surface: argument definitions, command handlers, and the
//! table/HTML projections they print.

pub mod commands;
pub mod render;

pub use commands::{Cli, Command, run_command};
