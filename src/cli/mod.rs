//! CLI command handlers

pub mod commands;

pub use commands::{audit, extract, sheets};
