//! Subcommand modules for the `msamap` binary.

pub mod align;
pub mod lift;
