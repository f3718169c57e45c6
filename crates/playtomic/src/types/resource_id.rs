//! Resource identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Maximum accepted identifier length.
const MAX_LEN: usize = 512;

/// A validated identifier for a tenant, tournament or other API resource.
///
/// Identifiers are interpolated into request paths, so they are restricted
/// to URL-unreserved characters.
///
/// # Example
///
/// ```
/// use playtomic::ResourceId;
///
/// let id = ResourceId::new("0b1c2d3e-aaaa-bbbb-cccc-123456789abc").unwrap();
/// assert_eq!(id.as_str(), "0b1c2d3e-aaaa-bbbb-cccc-123456789abc");
/// assert!(ResourceId::new("../admin").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new identifier from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, too long, `.`/`..`, or
    /// contains characters outside `A-Z a-z 0-9 . - _ ~`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: String| -> Error {
            InvalidInputError::ResourceId {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        if s.is_empty() {
            return Err(invalid("cannot be empty".to_string()));
        }

        if s.len() > MAX_LEN {
            return Err(invalid(format!(
                "exceeds maximum length of {} characters",
                MAX_LEN
            )));
        }

        if s == "." || s == ".." {
            return Err(invalid("cannot be '.' or '..'".to_string()));
        }

        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '-' | '_' | '~'))
        {
            return Err(invalid(format!("contains invalid character '{}'", c)));
        }

        Ok(())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
