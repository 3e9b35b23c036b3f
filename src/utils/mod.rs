//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`url_check`] - Redirect target validation

pub mod code_generator;
pub mod url_check;
