//! # Role Grants
//!
//! The flat role → grants table. Roles have no hierarchy and no precedence;
//! a role that is not in the table simply holds nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::grant::Grant;

/// Grants held by each role.
///
/// Deserializes from a JSON object of string arrays:
///
/// ```
/// use permitted_core::roles::RoleGrants;
///
/// let roles: RoleGrants = serde_json::from_str(r#"{
///     "user":  ["orders.read"],
///     "admin": ["orders.*"]
/// }"#).unwrap();
///
/// assert_eq!(roles.grants_for("admin").len(), 1);
/// assert!(roles.grants_for("guest").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleGrants {
    roles: HashMap<String, Vec<Grant>>,
}

impl RoleGrants {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Set the grants of a role, replacing any previous list.
    pub fn insert<I, G>(&mut self, role: impl Into<String>, grants: I)
    where
        I: IntoIterator<Item = G>,
        G: Into<Grant>,
    {
        self.roles
            .insert(role.into(), grants.into_iter().map(Into::into).collect());
    }

    /// Builder form of [`RoleGrants::insert`].
    ///
    /// # Example
    ///
    /// ```
    /// use permitted_core::roles::RoleGrants;
    ///
    /// let roles = RoleGrants::new()
    ///     .with_role("user", ["orders.read"])
    ///     .with_role("admin", ["orders.*", "users.*"]);
    /// assert_eq!(roles.len(), 2);
    /// ```
    pub fn with_role<I, G>(mut self, role: impl Into<String>, grants: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Grant>,
    {
        self.insert(role, grants);
        self
    }

    /// The grants of a role, or an empty slice for an unknown role.
    pub fn grants_for(&self, role: &str) -> &[Grant] {
        self.roles.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Concatenate the grants of every active role.
    ///
    /// Duplicates are kept; resolution is indifferent to them.
    pub fn collect_grants<'a, S>(&'a self, active_roles: &[S]) -> Vec<&'a Grant>
    where
        S: AsRef<str>,
    {
        active_roles
            .iter()
            .flat_map(|role| self.grants_for(role.as_ref()))
            .collect()
    }

    /// Check if a role is present in the table.
    pub fn contains_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Iterate over role names.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// Iterate over every (role, grant) pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grant)> {
        self.roles
            .iter()
            .flat_map(|(role, grants)| grants.iter().map(move |grant| (role.as_str(), grant)))
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if no roles are defined.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<R, I, G> FromIterator<(R, I)> for RoleGrants
where
    R: Into<String>,
    I: IntoIterator<Item = G>,
    G: Into<Grant>,
{
    fn from_iter<T: IntoIterator<Item = (R, I)>>(iter: T) -> Self {
        let mut table = RoleGrants::new();
        for (role, grants) in iter {
            table.insert(role, grants);
        }
        table
    }
}
