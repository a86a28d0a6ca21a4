//! CLI command handlers

pub mod commands;

pub use commands::{allocate, classify, init_config};
