//! PageStore domain layer
//!
//! Records, the identity contract, the repository contracts every backend
//! implements, and the validated input types that guard them.
//!
//! ```text
//! caller ── parse ──▶ NewRoute ── into_route ──▶ Route ──▶ Repository<Route>
//!                        │                                     │
//!                 ValidationError                        RepositoryError
//! ```

pub mod content;
pub mod entity;
pub mod errors;
pub mod repositories;
pub mod route;
pub mod validation;
pub mod value_objects;

#[cfg(any(test, feature = "testing"))]
pub mod contract;

pub use content::{Block, ButtonProps, HeaderProps, HeroProps, PageContent};
pub use entity::{Entity, WriteStamp};
pub use errors::{RepositoryError, RepositoryResult, StorageError};
pub use repositories::{ReadRepository, Repository, WriteRepository};
pub use route::{default_routes, NewRoute, Route, RouteChanges};
pub use validation::{ValidationError, ValidationResult, ValidationRule};
pub use value_objects::{ContentPath, RouteName, RoutePath};
