//! CLI command handlers

pub mod commands;

pub use commands::{convert, convert_to_writer, ConvertArgs};
