//! Subcommand implementations for the `j2s` binary.
pub mod generate;
