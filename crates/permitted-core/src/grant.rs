//! # Grants
//!
//! A grant is what a role holds: either a concrete permission identifier or a
//! wildcard pattern `prefix.*`. The kind is decided once, when the grant is
//! parsed, so matching never re-inspects the text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::permission::{PermissionId, SEGMENT_SEPARATOR};

/// Trailing marker that turns a grant into a wildcard.
pub const WILDCARD_SUFFIX: &str = ".*";

/// A permission grant held by a role.
///
/// Grants are either:
/// - **Exact**: cover exactly one permission identifier
/// - **Wildcard**: cover the prefix itself and every identifier nested under it
///
/// # Example
///
/// ```
/// use permitted_core::grant::Grant;
///
/// let grant = Grant::parse("users.*");
/// assert!(grant.is_wildcard());
/// assert!(grant.matches("users"));
/// assert!(grant.matches("users.read"));
/// assert!(grant.matches("users.profile.write"));
/// assert!(!grant.matches("username.read"));
///
/// let grant = Grant::parse("orders.read");
/// assert!(grant.matches("orders.read"));
/// assert!(!grant.matches("orders.write"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grant {
    /// Matches one permission by exact string equality.
    Exact(PermissionId),

    /// Matches `prefix` and anything below `prefix.`.
    Wildcard {
        /// The dotted path before the trailing `.*`.
        prefix: String,
    },
}

impl Grant {
    /// Parse a grant from its textual form.
    ///
    /// Anything ending in `.*` is a wildcard; everything else is exact.
    /// Parsing never fails.
    pub fn parse(grant: &str) -> Self {
        match grant.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => Grant::Wildcard {
                prefix: prefix.to_string(),
            },
            None => Grant::Exact(PermissionId::new(grant)),
        }
    }

    /// Create a wildcard grant covering `prefix`.
    pub fn wildcard(prefix: impl Into<String>) -> Self {
        Grant::Wildcard {
            prefix: prefix.into(),
        }
    }

    /// Check whether this grant covers a concrete permission.
    ///
    /// Wildcards compare against a full path separator, so `user.*` does not
    /// cover `username.read`.
    pub fn matches(&self, permission: &str) -> bool {
        match self {
            Grant::Exact(id) => id.as_str() == permission,
            Grant::Wildcard { prefix } => {
                permission == prefix
                    || permission
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with(SEGMENT_SEPARATOR))
            }
        }
    }

    /// Check if this is a wildcard grant.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Grant::Wildcard { .. })
    }
}

/// Check if a textual grant covers a concrete permission.
///
/// Convenience for one-off checks; resolution parses grants once instead.
///
/// # Example
///
/// ```
/// use permitted_core::grant::matches_permission;
///
/// assert!(matches_permission("users.*", "users.write"));
/// assert!(!matches_permission("users.*", "orders.read"));
/// ```
pub fn matches_permission(grant: &str, permission: &str) -> bool {
    Grant::parse(grant).matches(permission)
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grant::Exact(id) => f.write_str(id.as_str()),
            Grant::Wildcard { prefix } => write!(f, "{prefix}{WILDCARD_SUFFIX}"),
        }
    }
}

impl From<&str> for Grant {
    fn from(grant: &str) -> Self {
        Grant::parse(grant)
    }
}

impl From<String> for Grant {
    fn from(grant: String) -> Self {
        match grant.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => Grant::wildcard(prefix),
            None => Grant::Exact(PermissionId::from(grant)),
        }
    }
}

impl From<PermissionId> for Grant {
    fn from(id: PermissionId) -> Self {
        Grant::Exact(id)
    }
}

impl From<Grant> for String {
    fn from(grant: Grant) -> Self {
        match grant {
            Grant::Exact(id) => id.into_string(),
            wildcard => wildcard.to_string(),
        }
    }
}
