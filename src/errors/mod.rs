//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics recorded while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lookahead, prefix and literal failures
//! - Error formatting and suggestions

pub mod errors;
