//! Core domain entities.
//!
//! - [`UrlRecord`] - A short code and the URL it points to, with visit metadata
//! - [`NewUrlRecord`] - Input for creating a record

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
