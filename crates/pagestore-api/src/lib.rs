//! PageStore application layer
//!
//! Services that sit between a transport and the repositories, plus the
//! outward error type that turns repository faults into HTTP outcomes:
//!
//! | fault | status |
//! |-------|--------|
//! | `NotFound` | 404 |
//! | `AlreadyExists`, `ConcurrentModification` | 409 |
//! | validation, bad request | 400 |
//! | storage, serialization | 500, detail withheld |

pub mod error;
pub mod models;
pub mod services;

pub use error::{ApiError, ApiResult};
pub use services::{ContentService, RouteService};
