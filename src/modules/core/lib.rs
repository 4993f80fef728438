//! Core domain logic for the todos service
//!
//! This crate contains the configuration model, the identifier format
//! predicate and the error type shared by every other crate.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::TodoError;
