//! Subcommand modules for the `anno` binary.

pub mod gff;
pub mod pl;
