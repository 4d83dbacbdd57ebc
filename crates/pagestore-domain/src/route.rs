//! Route records
//!
//! A route maps a URL path to a display name and the content files that
//! make up the page. The path is the identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::Entity,
    validation::ValidationResult,
    value_objects::{ContentPath, RouteName, RoutePath},
};

/// A stored route
///
/// ```json
/// {
///   "path": "/",
///   "name": "homepage",
///   "blockIds": ["data/content/homepage.json"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    path: RoutePath,
    name: RouteName,
    #[serde(rename = "blockIds", default)]
    block_ids: Vec<ContentPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Route {
    /// Create an unsaved route; timestamps are filled in by the backend
    pub fn new(path: RoutePath, name: RouteName, block_ids: Vec<ContentPath>) -> Self {
        Self {
            path,
            name,
            block_ids,
            created_at: None,
            updated_at: None,
        }
    }

    /// The route every site starts with
    pub fn homepage() -> Self {
        Self::new(
            RoutePath::root(),
            RouteName::parse("homepage").expect("static name is valid"),
            vec![ContentPath::parse("data/content/homepage.json").expect("static path is valid")],
        )
    }

    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn name(&self) -> &RouteName {
        &self.name
    }

    pub fn block_ids(&self) -> &[ContentPath] {
        &self.block_ids
    }

    /// First content file, the one the page renders from
    pub fn primary_block(&self) -> Option<&ContentPath> {
        self.block_ids.first()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn rename(&mut self, name: RouteName) {
        self.name = name;
    }

    pub fn set_block_ids(&mut self, block_ids: Vec<ContentPath>) {
        self.block_ids = block_ids;
    }

    /// Copy with a new name
    pub fn with_name(mut self, name: RouteName) -> Self {
        self.rename(name);
        self
    }

    /// Equal in every caller-controlled field, timestamps ignored
    pub fn same_content(&self, other: &Self) -> bool {
        self.path == other.path && self.name == other.name && self.block_ids == other.block_ids
    }
}

impl Entity for Route {
    type Id = RoutePath;

    const ENTITY_TYPE: &'static str = "Route";

    fn id(&self) -> &RoutePath {
        &self.path
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn stamp(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }
}

/// Routes used when nothing has been stored yet
pub fn default_routes() -> Vec<Route> {
    vec![Route::homepage()]
}

/// Validated input for creating a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
    path: RoutePath,
    name: RouteName,
    block_ids: Vec<ContentPath>,
}

impl NewRoute {
    /// Validate raw input field by field (path, name, then each block id),
    /// stopping at the first violation.
    pub fn parse<I, S>(
        path: impl Into<String>,
        name: impl Into<String>,
        block_ids: I,
    ) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = RoutePath::parse(path)?;
        let name = RouteName::parse(name)?;
        let block_ids = block_ids
            .into_iter()
            .map(ContentPath::parse)
            .collect::<ValidationResult<Vec<_>>>()?;
        Ok(Self {
            path,
            name,
            block_ids,
        })
    }

    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn name(&self) -> &RouteName {
        &self.name
    }

    pub fn block_ids(&self) -> &[ContentPath] {
        &self.block_ids
    }

    /// Consume into an unsaved route
    pub fn into_route(self) -> Route {
        Route::new(self.path, self.name, self.block_ids)
    }
}

/// Validated partial update of a route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteChanges {
    name: Option<RouteName>,
    block_ids: Option<Vec<ContentPath>>,
}

impl RouteChanges {
    /// Validate the fields that are present, name first
    pub fn parse<I, S>(name: Option<String>, block_ids: Option<I>) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.map(RouteName::parse).transpose()?;
        let block_ids = block_ids
            .map(|ids| {
                ids.into_iter()
                    .map(ContentPath::parse)
                    .collect::<ValidationResult<Vec<_>>>()
            })
            .transpose()?;
        Ok(Self { name, block_ids })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.block_ids.is_none()
    }

    /// Apply to a stored route, consuming the changes
    pub fn apply(self, mut route: Route) -> Route {
        if let Some(name) = self.name {
            route.rename(name);
        }
        if let Some(block_ids) = self.block_ids {
            route.set_block_ids(block_ids);
        }
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationRule;

    #[test]
    fn test_json_shape_matches_routes_file() {
        let json = serde_json::to_value(Route::homepage()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "/",
                "name": "homepage",
                "blockIds": ["data/content/homepage.json"]
            })
        );
    }

    #[test]
    fn test_reads_routes_file_entry() {
        let route: Route = serde_json::from_str(
            r#"{"path": "/foo", "name": "foo", "blockIds": ["data/content/foo.json"]}"#,
        )
        .unwrap();
        assert_eq!(route.path().as_str(), "/foo");
        assert_eq!(route.primary_block().unwrap().as_str(), "data/content/foo.json");
        assert!(route.created_at().is_none());
    }

    #[test]
    fn test_invalid_stored_path_is_rejected() {
        let result = serde_json::from_str::<Route>(r#"{"path": "foo", "name": "foo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_route_stops_at_first_violation() {
        let err = NewRoute::parse("about", "", ["nope"]).unwrap_err();
        assert_eq!(err.field, "path");
        assert_eq!(err.rule, ValidationRule::MissingLeadingSlash);

        let err = NewRoute::parse("/about", "", ["nope"]).unwrap_err();
        assert_eq!(err.field, "name");

        let err = NewRoute::parse("/about", "About", ["ok.json", "nope"]).unwrap_err();
        assert_eq!(err.field, "block_id");
        assert_eq!(err.input, "nope");
    }

    #[test]
    fn test_new_route_into_route() {
        let route = NewRoute::parse("/about", "About Page", Vec::<String>::new())
            .unwrap()
            .into_route();
        assert_eq!(route.name().as_str(), "About Page");
        assert!(route.block_ids().is_empty());
        assert!(route.updated_at().is_none());
    }

    #[test]
    fn test_changes_apply() {
        let changes = RouteChanges::parse(Some("Start".to_string()), None::<Vec<String>>).unwrap();
        assert!(!changes.is_empty());
        let route = changes.apply(Route::homepage());
        assert_eq!(route.name().as_str(), "Start");
        assert_eq!(route.block_ids().len(), 1);
    }

    #[test]
    fn test_stamp_sets_both_timestamps() {
        let mut route = Route::homepage();
        let now = Utc::now();
        route.stamp(now, now);
        assert_eq!(Entity::created_at(&route), Some(now));
        assert_eq!(route.updated_at(), Some(now));
        assert!(route.same_content(&Route::homepage()));
    }
}
