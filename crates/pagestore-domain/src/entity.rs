//! Identity contract for storable records

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// A record with a stable identifier that can live in a repository.
///
/// The identifier never changes for the lifetime of a record and addresses
/// exactly one record within its collection. Timestamps, when a record has
/// them, are owned by the backend: callers never set them, backends call
/// [`Entity::stamp`] on every write.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type
    type Id: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Human-readable type name used in error messages
    const ENTITY_TYPE: &'static str;

    /// The record's identifier
    fn id(&self) -> &Self::Id;

    /// Creation time as recorded by the backend
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Overwrite backend-populated timestamps
    fn stamp(&mut self, _created_at: DateTime<Utc>, _updated_at: DateTime<Utc>) {}
}

/// Timestamps applied by a backend for a single write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStamp {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WriteStamp {
    /// Stamp for a freshly created record
    pub fn for_create() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamp for an update of a record created at `created_at`.
    ///
    /// `updated_at` never precedes `created_at`, even if the clock stepped
    /// backwards between the two writes.
    pub fn for_update(created_at: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        let created_at = created_at.unwrap_or(now);
        Self {
            created_at,
            updated_at: now.max(created_at),
        }
    }

    /// Apply to a record
    pub fn apply<E: Entity>(self, entity: &mut E) {
        entity.stamp(self.created_at, self.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_stamp_is_equal() {
        let stamp = WriteStamp::for_create();
        assert_eq!(stamp.created_at, stamp.updated_at);
    }

    #[test]
    fn test_update_preserves_creation() {
        let created = Utc::now() - Duration::hours(1);
        let stamp = WriteStamp::for_update(Some(created));
        assert_eq!(stamp.created_at, created);
        assert!(stamp.updated_at >= created);
    }

    #[test]
    fn test_update_never_goes_backwards() {
        let created = Utc::now() + Duration::hours(1);
        let stamp = WriteStamp::for_update(Some(created));
        assert_eq!(stamp.updated_at, created);
    }
}
