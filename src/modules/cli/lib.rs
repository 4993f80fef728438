//! Todos CLI
//!
//! This crate provides the command-line interface for the todos service:
//! - run: Start the server
//! - init: Write a starter configuration
//! - validate: Check a configuration file

pub mod commands;

pub use commands::{Cli, Commands};
