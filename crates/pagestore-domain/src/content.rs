//! Page content made of typed blocks
//!
//! Each variant of [`Block`] carries its own props struct. Serialized with a
//! `type` discriminant and a `props` payload:
//!
//! ```json
//! {
//!   "type": "Header",
//!   "props": {
//!     "headline": "...",
//!     "button": { "href": "/contact", "text": "...", "aria_label": "..." }
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entity::Entity, value_objects::ContentPath};

/// Button props, reused across blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonProps {
    pub href: String,
    pub text: String,
    pub aria_label: String,
}

/// Header block props
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderProps {
    pub headline: String,
    pub button: ButtonProps,
}

/// Hero block props
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroProps {
    pub headline: String,
    pub subheadline: String,
}

/// One content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum Block {
    Header(HeaderProps),
    Hero(HeroProps),
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Header(_) => "Header",
            Block::Hero(_) => "Hero",
        }
    }
}

/// Ordered blocks stored under one content path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    path: ContentPath,
    blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl PageContent {
    pub fn new(path: ContentPath, blocks: Vec<Block>) -> Self {
        Self {
            path,
            blocks,
            created_at: None,
            updated_at: None,
        }
    }

    /// Content shown on a fresh site's homepage
    pub fn default_homepage() -> Self {
        Self::new(
            ContentPath::parse("data/content/homepage.json").expect("static path is valid"),
            default_homepage_blocks(),
        )
    }

    pub fn path(&self) -> &ContentPath {
        &self.path
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }

    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Equal in every caller-controlled field, timestamps ignored
    pub fn same_content(&self, other: &Self) -> bool {
        self.path == other.path && self.blocks == other.blocks
    }
}

impl Entity for PageContent {
    type Id = ContentPath;

    const ENTITY_TYPE: &'static str = "PageContent";

    fn id(&self) -> &ContentPath {
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

/// Blocks used when a homepage has no stored content
pub fn default_homepage_blocks() -> Vec<Block> {
    vec![
        Block::Header(HeaderProps {
            headline: "Eng Manager".to_string(),
            button: ButtonProps {
                href: "/contact".to_string(),
                text: "Get in touch".to_string(),
                aria_label: "Contact us to discuss your engineering needs".to_string(),
            },
        }),
        Block::Hero(HeroProps {
            headline: "Building world-class engineering teams".to_string(),
            subheadline: "Leadership through example, expertise, and empathy".to_string(),
        }),
    ]
}
