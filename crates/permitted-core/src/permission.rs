//! # Permissions
//!
//! Concrete permission identifiers and the resolved permission set.
//! An identifier is a dot-separated path such as `orders.read` or
//! `users.profile.write`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt;

/// Segment separator inside a permission identifier.
pub const SEGMENT_SEPARATOR: char = '.';

/// Final segment that implies the matching read permission.
pub const WRITE_SUFFIX: &str = ".write";

/// Final segment produced by the write-implies-read rule.
pub const READ_SUFFIX: &str = ".read";

/// A concrete permission identifier.
///
/// Identifiers are opaque, case-sensitive strings compared by exact equality.
/// They are declared once in a [`PermissionTree`](crate::tree::PermissionTree)
/// and treated as immutable values thereafter.
///
/// # Example
///
/// ```
/// use permitted_core::permission::PermissionId;
///
/// let perm = PermissionId::new("users.profile.write");
/// assert_eq!(perm.as_str(), "users.profile.write");
/// assert_eq!(perm.segments().count(), 3);
/// assert_eq!(perm.implied_read(), Some(PermissionId::new("users.profile.read")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

impl PermissionId {
    /// Create a permission identifier from any string.
    ///
    /// No validation is performed; see [`PermissionId::is_well_formed`].
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterate over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_SEPARATOR)
    }

    /// Check that the identifier is non-empty and has no empty segment.
    ///
    /// # Example
    ///
    /// ```
    /// use permitted_core::permission::PermissionId;
    ///
    /// assert!(PermissionId::new("orders.read").is_well_formed());
    /// assert!(!PermissionId::new("orders..read").is_well_formed());
    /// assert!(!PermissionId::new("").is_well_formed());
    /// ```
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.segments().all(|segment| !segment.is_empty())
    }

    /// The read permission implied by this one, if it is a write permission.
    ///
    /// Only the trailing `.write` is rewritten, once.
    pub fn implied_read(&self) -> Option<PermissionId> {
        self.0
            .strip_suffix(WRITE_SUFFIX)
            .map(|prefix| PermissionId(format!("{prefix}{READ_SUFFIX}")))
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PermissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PermissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A resolved set of concrete permissions.
///
/// Membership is exact: wildcards are expanded before anything lands in the
/// set, so `has("orders.read")` never consults a pattern.
///
/// # Example
///
/// ```
/// use permitted_core::permission::PermissionSet;
///
/// let set: PermissionSet = ["orders.read", "orders.write"].into_iter().collect();
///
/// assert!(set.has("orders.read"));
/// assert!(set.has_some(["users.read", "orders.write"]));
/// assert!(!set.has_every(["orders.read", "users.read"]));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: HashSet<PermissionId>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// Add a permission to the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was not already present
    pub fn insert(&mut self, permission: impl Into<PermissionId>) -> bool {
        self.permissions.insert(permission.into())
    }

    /// Check if the set contains a permission.
    pub fn has(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Check if the set contains at least one of the given permissions.
    ///
    /// An empty list is never satisfied.
    pub fn has_some<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions.into_iter().any(|p| self.has(p.as_ref()))
    }

    /// Check if the set contains every one of the given permissions.
    ///
    /// An empty list is always satisfied.
    pub fn has_every<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions.into_iter().all(|p| self.has(p.as_ref()))
    }

    /// Check if this set contains all permissions from another set.
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        other.permissions.is_subset(&self.permissions)
    }

    /// Merge another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.permissions.extend(other.permissions.iter().cloned());
    }

    /// Iterate over the permissions in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, PermissionId> {
        self.permissions.iter()
    }

    /// Get the permissions sorted, for stable output.
    pub fn to_sorted_vec(&self) -> Vec<PermissionId> {
        let mut sorted: Vec<PermissionId> = self.permissions.iter().cloned().collect();
        sorted.sort();
        sorted
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl<P: Into<PermissionId>> FromIterator<P> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        set.extend(iter);
        set
    }
}

impl<P: Into<PermissionId>> Extend<P> for PermissionSet {
    fn extend<T: IntoIterator<Item = P>>(&mut self, iter: T) {
        self.permissions.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for PermissionSet {
    type Item = PermissionId;
    type IntoIter = hash_set::IntoIter<PermissionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a PermissionId;
    type IntoIter = hash_set::Iter<'a, PermissionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}
