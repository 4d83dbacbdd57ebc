//! Validated wrappers for raw domain input
//!
//! Each wrapper has a single checked constructor (`parse`). Once built, the
//! invariant holds for the wrapper's whole lifetime: there are no setters,
//! only read access (`as_str`) and a consuming `into_inner`. Deserialization
//! goes through the same constructor, so a record read back from storage
//! cannot smuggle in an invalid value.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationResult, ValidationRule};

/// Characters allowed inside one path segment
static SEGMENT_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._~-]+$").expect("segment pattern is valid"));

const MAX_PATH_LEN: usize = 256;
const MAX_NAME_LEN: usize = 100;

/// Check the segments of a `/`-separated path, first violation wins
fn check_segments(field: &'static str, raw: &str, body: &str) -> ValidationResult<()> {
    for segment in body.split('/') {
        if segment.is_empty() {
            return Err(ValidationError::new(field, ValidationRule::EmptySegment, raw));
        }
        if segment == "." || segment == ".." {
            return Err(ValidationError::new(field, ValidationRule::DotSegment, raw));
        }
        if !SEGMENT_CHARS.is_match(segment) {
            let bad = segment
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '~' | '-')))
                .unwrap_or('?');
            return Err(ValidationError::new(
                field,
                ValidationRule::InvalidCharacter(bad),
                raw,
            ));
        }
    }
    Ok(())
}

/// URL path of a route, e.g. `/` or `/about`
///
/// Starts with `/`, has no trailing slash (except the root itself), no empty
/// or dot segments, and only unreserved URL characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    pub const FIELD: &'static str = "path";

    /// Validate a raw route path
    pub fn parse(raw: impl Into<String>) -> ValidationResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::new(Self::FIELD, ValidationRule::Empty, raw));
        }
        if raw.chars().count() > MAX_PATH_LEN {
            return Err(ValidationError::new(
                Self::FIELD,
                ValidationRule::TooLong { max: MAX_PATH_LEN },
                raw,
            ));
        }
        let Some(body) = raw.strip_prefix('/') else {
            return Err(ValidationError::new(
                Self::FIELD,
                ValidationRule::MissingLeadingSlash,
                raw,
            ));
        };
        if body.is_empty() {
            return Ok(Self(raw));
        }
        if body.ends_with('/') {
            return Err(ValidationError::new(Self::FIELD, ValidationRule::TrailingSlash, raw));
        }
        check_segments(Self::FIELD, &raw, body)?;
        Ok(Self(raw))
    }

    /// The root route `/`
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

/// Display name of a route, e.g. `homepage` or `About Page`
///
/// Surrounding whitespace is trimmed; the trimmed name is non-empty, at most
/// 100 characters, and free of control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteName(String);

impl RouteName {
    pub const FIELD: &'static str = "name";

    /// Validate a raw route name
    pub fn parse(raw: impl Into<String>) -> ValidationResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(Self::FIELD, ValidationRule::Empty, raw));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::new(
                Self::FIELD,
                ValidationRule::TooLong { max: MAX_NAME_LEN },
                raw,
            ));
        }
        if let Some(bad) = trimmed.chars().find(|c| c.is_control()) {
            return Err(ValidationError::new(
                Self::FIELD,
                ValidationRule::InvalidCharacter(bad),
                raw,
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Relative path of a content file, e.g. `data/content/homepage.json`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentPath(String);

impl ContentPath {
    pub const FIELD: &'static str = "block_id";
    pub const EXTENSION: &'static str = ".json";

    /// Validate a raw content path
    pub fn parse(raw: impl Into<String>) -> ValidationResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::new(Self::FIELD, ValidationRule::Empty, raw));
        }
        if raw.chars().count() > MAX_PATH_LEN {
            return Err(ValidationError::new(
                Self::FIELD,
                ValidationRule::TooLong { max: MAX_PATH_LEN },
                raw,
            ));
        }
        if raw.starts_with('/') {
            return Err(ValidationError::new(Self::FIELD, ValidationRule::LeadingSlash, raw));
        }
        check_segments(Self::FIELD, &raw, &raw)?;
        let stem_len = raw.len().saturating_sub(Self::EXTENSION.len());
        if !raw.ends_with(Self::EXTENSION) || raw[..stem_len].ends_with('/') || stem_len == 0 {
            return Err(ValidationError::new(
                Self::FIELD,
                ValidationRule::MissingExtension(Self::EXTENSION),
                raw,
            ));
        }
        Ok(Self(raw))
    }

    /// Conventional content path for a route name slug
    pub fn for_slug(slug: &str) -> ValidationResult<Self> {
        Self::parse(format!("data/content/{}.json", slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! string_wrapper_impls {
    ($($ty:ident),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = ValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::parse(value)
                }
            }

            impl TryFrom<&str> for $ty {
                type Error = ValidationError;

                fn try_from(value: &str) -> Result<Self, Self::Error> {
                    Self::parse(value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

string_wrapper_impls!(RoutePath, RouteName, ContentPath);
