//! In-Memory Repository Implementation
//!
//! Thread-safe in-memory implementation of the repository contracts.
//! Suitable for testing and development.

mod repository;

pub use repository::InMemoryRepository;
