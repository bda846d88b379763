//! Subcommand drivers connecting the CLI to the library.

pub mod clean;
pub mod upload;
