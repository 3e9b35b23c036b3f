//! Repository implementations.
//!
//! - [`PgUrlRepository`] - PostgreSQL storage used in production
//! - [`InMemoryUrlRepository`] - In-process storage with the same semantics

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
