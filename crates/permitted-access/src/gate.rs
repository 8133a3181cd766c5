//! Permission gates
//!
//! Small decision helpers for code that shows or hides content, or lets a
//! request through to a route, based on resolved access.
//!
//! - [`Requirement`]: one permission, any of several, or all of several
//! - [`show_if_permitted`]: pick content or a fallback
//! - [`RouteGuard`]: proceed, or redirect somewhere safe

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::PermittedAccess;

/// Where a denied route guard sends the caller unless told otherwise.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// What a piece of content or a route requires.
///
/// # Examples
///
/// ```
/// use permitted_access::Requirement;
///
/// let req: Requirement = serde_json::from_str(r#"{"some": ["orders.read", "orders.write"]}"#).unwrap();
/// assert_eq!(req, Requirement::some(["orders.read", "orders.write"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// A single permission.
    Permission(String),
    /// At least one of the permissions. Never satisfied when empty.
    Some(Vec<String>),
    /// Every one of the permissions. Always satisfied when empty.
    Every(Vec<String>),
}

impl Requirement {
    /// Require a single permission.
    pub fn permission(permission: impl Into<String>) -> Self {
        Requirement::Permission(permission.into())
    }

    /// Require at least one of `permissions`.
    pub fn some<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::Some(permissions.into_iter().map(Into::into).collect())
    }

    /// Require all of `permissions`.
    pub fn every<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::Every(permissions.into_iter().map(Into::into).collect())
    }

    /// Check the requirement against resolved access.
    pub fn is_satisfied_by(&self, access: &PermittedAccess) -> bool {
        match self {
            Requirement::Permission(permission) => access.has_permission(permission),
            Requirement::Some(permissions) => access.has_some_permission(permissions),
            Requirement::Every(permissions) => access.has_every_permission(permissions),
        }
    }
}

/// Return `content` when the requirement is met, otherwise `fallback`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use permitted_access::{show_if_permitted, PermittedAccess, Requirement};
/// use permitted_core::{PermissionTree, RoleGrants};
///
/// let tree = Arc::new(PermissionTree::new().with("read", "orders.read"));
/// let roles = Arc::new(RoleGrants::new());
/// let access = PermittedAccess::new(tree, roles, ["guest"]);
///
/// let shown = show_if_permitted(&access, &Requirement::permission("orders.read"), "orders", Some("sign in"));
/// assert_eq!(shown, Some("sign in"));
/// ```
pub fn show_if_permitted<T>(
    access: &PermittedAccess,
    requirement: &Requirement,
    content: T,
    fallback: Option<T>,
) -> Option<T> {
    if requirement.is_satisfied_by(access) {
        Some(content)
    } else {
        fallback
    }
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The route may be entered.
    Proceed,
    /// The caller should be sent to this path instead.
    Redirect(String),
}

impl RouteDecision {
    /// Check if the route may be entered.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Proceed)
    }
}

/// Guards a route behind a single permission.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use permitted_access::{PermittedAccess, RouteDecision, RouteGuard};
/// use permitted_core::{PermissionTree, RoleGrants};
///
/// let tree = Arc::new(PermissionTree::new().with("admin", "settings.admin"));
/// let access = PermittedAccess::new(tree, Arc::new(RoleGrants::new()), ["user"]);
///
/// let guard = RouteGuard::new("settings.admin");
/// assert_eq!(guard.check(&access), RouteDecision::Redirect("/dashboard".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGuard {
    /// Permission required to enter the route.
    pub permission: String,

    /// Path to redirect to when the permission is missing.
    #[serde(default = "default_redirect")]
    pub redirect_to: String,
}

fn default_redirect() -> String {
    DEFAULT_REDIRECT.to_string()
}

impl RouteGuard {
    /// Guard a route, redirecting to [`DEFAULT_REDIRECT`] on denial.
    pub fn new(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            redirect_to: default_redirect(),
        }
    }

    /// Redirect somewhere other than the default on denial.
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    /// Decide whether the route may be entered.
    pub fn check(&self, access: &PermittedAccess) -> RouteDecision {
        if access.has_permission(&self.permission) {
            RouteDecision::Proceed
        } else {
            debug!(
                permission = %self.permission,
                redirect_to = %self.redirect_to,
                "Route denied, redirecting"
            );
            RouteDecision::Redirect(self.redirect_to.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permitted_core::{PermissionTree, RoleGrants};
    use std::sync::Arc;

    fn access(roles: &[&str]) -> PermittedAccess {
        let tree = Arc::new(
            PermissionTree::new()
                .with("orders", PermissionTree::new()
                    .with("read", "orders.read")
                    .with("write", "orders.write"))
                .with("users", PermissionTree::new().with("read", "users.read")),
        );
        let grants = Arc::new(
            RoleGrants::new()
                .with_role("user", ["orders.read"])
                .with_role("admin", ["orders.*", "users.*"]),
        );
        PermittedAccess::new(tree, grants, roles.iter().copied())
    }

    #[test]
    fn test_requirement_permission() {
        let req = Requirement::permission("orders.read");
        assert!(req.is_satisfied_by(&access(&["user"])));
        assert!(!req.is_satisfied_by(&access(&[])));
    }

    #[test]
    fn test_requirement_some() {
        let req = Requirement::some(["users.read", "orders.read"]);
        assert!(req.is_satisfied_by(&access(&["user"])));
        assert!(!Requirement::some(["users.read"]).is_satisfied_by(&access(&["user"])));
        assert!(!Requirement::some(Vec::<String>::new()).is_satisfied_by(&access(&["admin"])));
    }

    #[test]
    fn test_requirement_every() {
        let req = Requirement::every(["users.read", "orders.read"]);
        assert!(req.is_satisfied_by(&access(&["admin"])));
        assert!(!req.is_satisfied_by(&access(&["user"])));
        assert!(Requirement::every(Vec::<String>::new()).is_satisfied_by(&access(&[])));
    }

    #[test]
    fn test_show_if_permitted() {
        let user = access(&["user"]);
        let req = Requirement::permission("orders.write");

        assert_eq!(show_if_permitted(&user, &req, "edit", Some("view only")), Some("view only"));
        assert_eq!(show_if_permitted(&user, &req, "edit", None), None);
        assert_eq!(show_if_permitted(&access(&["admin"]), &req, "edit", None), Some("edit"));
    }

    #[test]
    fn test_route_guard_default_redirect() {
        let guard = RouteGuard::new("users.read");
        assert_eq!(guard.check(&access(&["user"])), RouteDecision::Redirect("/dashboard".to_string()));
        assert!(guard.check(&access(&["admin"])).is_allowed());
    }

    #[test]
    fn test_route_guard_custom_redirect() {
        let guard = RouteGuard::new("users.read").redirect_to("/login");
        assert_eq!(guard.check(&access(&[])), RouteDecision::Redirect("/login".to_string()));
    }

    #[test]
    fn test_route_guard_deserialize_defaults() {
        let guard: RouteGuard = serde_json::from_str(r#"{"permission": "orders.read"}"#).unwrap();
        assert_eq!(guard.redirect_to, DEFAULT_REDIRECT);
    }

    #[test]
    fn test_requirement_serde() {
        let req: Requirement = serde_json::from_str(r#"{"permission": "orders.read"}"#).unwrap();
        assert_eq!(req, Requirement::permission("orders.read"));

        let req: Requirement = serde_json::from_str(r#"{"every": []}"#).unwrap();
        assert_eq!(req, Requirement::Every(vec![]));
    }
}
