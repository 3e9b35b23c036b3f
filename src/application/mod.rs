//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Resolution, creation, update, deletion, and stats

pub mod services;
