//! Subcommand implementations.

pub mod batch;
pub mod check;
pub mod evaluate;
pub mod init;
