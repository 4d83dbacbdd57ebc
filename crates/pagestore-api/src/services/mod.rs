//! Application services
//!
//! Validate raw input, call repositories, and surface faults as
//! [`ApiError`](crate::error::ApiError). Generic over the repository so the
//! same service runs on any backend, including a runtime-selected
//! `Arc<dyn Repository<_>>`.

mod content;
mod routes;

pub use content::ContentService;
pub use routes::RouteService;
