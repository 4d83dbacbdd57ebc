//! Validation failures raised by smart constructors
//!
//! Constructors stop at the first rule that fails, checking fields in
//! declaration order. Callers that want every violation at once must run
//! the individual constructors themselves and collect the errors.

use std::fmt;

use thiserror::Error;

/// The rule a raw input broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Empty, or only whitespace
    Empty,
    /// Longer than the allowed number of characters
    TooLong { max: usize },
    /// A route path must start with `/`
    MissingLeadingSlash,
    /// A content path must be relative
    LeadingSlash,
    /// Only `/` itself may end with a slash
    TrailingSlash,
    /// Two consecutive separators
    EmptySegment,
    /// `.` or `..` as a path segment
    DotSegment,
    /// Character outside the allowed set
    InvalidCharacter(char),
    /// Missing required file extension
    MissingExtension(&'static str),
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "must not be empty"),
            Self::TooLong { max } => write!(f, "must be at most {} characters", max),
            Self::MissingLeadingSlash => write!(f, "must start with '/'"),
            Self::LeadingSlash => write!(f, "must be a relative path"),
            Self::TrailingSlash => write!(f, "must not end with '/'"),
            Self::EmptySegment => write!(f, "must not contain empty segments"),
            Self::DotSegment => write!(f, "must not contain '.' or '..' segments"),
            Self::InvalidCharacter(c) => write!(f, "contains invalid character {:?}", c),
            Self::MissingExtension(ext) => write!(f, "must end with '{}'", ext),
        }
    }
}

/// A raw value rejected by a smart constructor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {input:?}: {rule}")]
pub struct ValidationError {
    /// Name of the field being validated
    pub field: &'static str,
    /// Rule that failed
    pub rule: ValidationRule,
    /// The offending raw input
    pub input: String,
}

impl ValidationError {
    pub fn new(field: &'static str, rule: ValidationRule, input: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            input: input.into(),
        }
    }
}

/// Result type alias for smart constructors
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_field_rule_and_input() {
        let err = ValidationError::new("path", ValidationRule::MissingLeadingSlash, "about");
        assert_eq!(err.to_string(), "invalid path \"about\": must start with '/'");
    }

    #[test]
    fn test_too_long_message() {
        let rule = ValidationRule::TooLong { max: 10 };
        assert_eq!(rule.to_string(), "must be at most 10 characters");
    }
}
