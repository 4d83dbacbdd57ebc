//! Collection naming shared by the file and document backends

use pagestore_domain::{Entity, PageContent, Route};
use serde::{de::DeserializeOwned, Serialize};

/// A record type that is stored as a named collection
pub trait Collection: Entity + Serialize + DeserializeOwned {
    /// Collection name: file stem for the JSON backend, table for SurrealDB
    const COLLECTION: &'static str;

    /// Name of the serialized field holding the identifier
    const ID_FIELD: &'static str;

    /// Declared field types for backends that support a schema
    fn fields() -> &'static [FieldSpec];
}

/// One declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Type expression in the backend's schema language
    pub kind: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: &'static str) -> Self {
        Self { name, kind }
    }
}

const ROUTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("path", "string"),
    FieldSpec::new("name", "string"),
    FieldSpec::new("blockIds", "array<string>"),
    FieldSpec::new("created_at", "option<string>"),
    FieldSpec::new("updated_at", "option<string>"),
];

const CONTENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("path", "string"),
    FieldSpec::new("blocks", "array<object>"),
    FieldSpec::new("created_at", "option<string>"),
    FieldSpec::new("updated_at", "option<string>"),
];

impl Collection for Route {
    const COLLECTION: &'static str = "routes";
    const ID_FIELD: &'static str = "path";

    fn fields() -> &'static [FieldSpec] {
        ROUTE_FIELDS
    }
}

impl Collection for PageContent {
    const COLLECTION: &'static str = "page_content";
    const ID_FIELD: &'static str = "path";

    fn fields() -> &'static [FieldSpec] {
        CONTENT_FIELDS
    }
}
