//! Request and response models
//!
//! Requests carry raw strings; the services turn them into validated domain
//! types before any repository is touched.

use pagestore_domain::{Block, PageContent, Route};
use serde::{Deserialize, Serialize};

/// Route creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRouteRequest {
    /// URL path, e.g. `/about`
    pub path: String,
    /// Admin name
    pub name: String,
    /// Content files, primary first
    #[serde(rename = "blockIds", default)]
    pub block_ids: Vec<String>,
}

/// Partial route update; absent fields stay as stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRouteRequest {
    pub name: Option<String>,
    #[serde(rename = "blockIds")]
    pub block_ids: Option<Vec<String>>,
}

/// Route list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteListResponse {
    pub routes: Vec<Route>,
    pub total: usize,
}

impl From<Vec<Route>> for RouteListResponse {
    fn from(routes: Vec<Route>) -> Self {
        Self {
            total: routes.len(),
            routes,
        }
    }
}

/// Replacement blocks for a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBlocksRequest {
    pub blocks: Vec<Block>,
}

/// Blocks of one route's page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub route: String,
    /// Content file the blocks came from
    pub source: String,
    pub blocks: Vec<Block>,
}

impl PageResponse {
    pub fn new(route: &Route, content: PageContent) -> Self {
        Self {
            route: route.name().to_string(),
            source: content.path().to_string(),
            blocks: content.into_blocks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_uses_block_ids_key() {
        let request: CreateRouteRequest = serde_json::from_str(
            r#"{"path": "/about", "name": "about", "blockIds": ["data/content/about.json"]}"#,
        )
        .unwrap();
        assert_eq!(request.block_ids, vec!["data/content/about.json"]);
    }

    #[test]
    fn test_create_request_blocks_default_to_empty() {
        let request: CreateRouteRequest =
            serde_json::from_str(r#"{"path": "/about", "name": "about"}"#).unwrap();
        assert!(request.block_ids.is_empty());
    }

    #[test]
    fn test_update_request_fields_are_optional() {
        let request: UpdateRouteRequest = serde_json::from_str(r#"{"name": "About Us"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("About Us"));
        assert!(request.block_ids.is_none());
    }

    #[test]
    fn test_list_counts_routes() {
        let list = RouteListResponse::from(pagestore_domain::default_routes());
        assert_eq!(list.total, 1);
    }
}
