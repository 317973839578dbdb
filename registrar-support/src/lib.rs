//! # Registrar Support
//!
//! Shared utilities for the registrar crates:
//! - Registry identifier generation
//! - Text rendering for error messages

pub mod id;
pub mod rendering;
