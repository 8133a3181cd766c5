//! Resolved access for one session
//!
//! `PermittedAccess` binds a permission tree, a role grant table and the
//! currently active roles to their resolved permission set. It is built once
//! per request or session and passed by reference to whatever needs to ask
//! permission questions.

use permitted_core::{resolve_declared, PermissionId, PermissionSet, PermissionTree, RoleGrants};
use std::sync::Arc;
use tracing::debug;

/// Resolved permissions for a set of active roles.
///
/// The tree and grant table are shared through `Arc`, so many sessions can
/// point at the same declarations. Replacing an input recomputes the set only
/// when the new input actually differs: the tree and table are compared by
/// identity, the active roles by value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use permitted_access::PermittedAccess;
/// use permitted_core::{PermissionTree, RoleGrants};
///
/// let tree = Arc::new(PermissionTree::new().with("orders", PermissionTree::new()
///     .with("read", "orders.read")
///     .with("write", "orders.write")));
/// let roles = Arc::new(RoleGrants::new().with_role("clerk", ["orders.write"]));
///
/// let access = PermittedAccess::new(tree, roles, ["clerk"]);
/// assert!(access.has_permission("orders.read"));
/// assert!(access.has_every_permission(["orders.read", "orders.write"]));
/// ```
#[derive(Debug, Clone)]
pub struct PermittedAccess {
    tree: Arc<PermissionTree>,
    role_grants: Arc<RoleGrants>,
    active_roles: Vec<String>,
    declared: Vec<PermissionId>,
    permissions: PermissionSet,
}

impl PermittedAccess {
    /// Resolve access for the given active roles.
    pub fn new<I, S>(tree: Arc<PermissionTree>, role_grants: Arc<RoleGrants>, active_roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared = tree.flatten();
        let active_roles: Vec<String> = active_roles.into_iter().map(Into::into).collect();
        let permissions = resolve_declared(&declared, &role_grants, active_roles.as_slice());

        Self {
            tree,
            role_grants,
            active_roles,
            declared,
            permissions,
        }
    }

    /// Check if a single permission is held.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.has(permission)
    }

    /// Check if at least one of the permissions is held.
    ///
    /// An empty list is never satisfied.
    pub fn has_some_permission<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.permissions.has_some(permissions)
    }

    /// Check if every one of the permissions is held.
    ///
    /// An empty list is always satisfied.
    pub fn has_every_permission<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.permissions.has_every(permissions)
    }

    /// The resolved permission set.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// The currently active roles.
    pub fn active_roles(&self) -> &[String] {
        &self.active_roles
    }

    /// The permission tree in use.
    pub fn tree(&self) -> &Arc<PermissionTree> {
        &self.tree
    }

    /// The role grant table in use.
    pub fn role_grants(&self) -> &Arc<RoleGrants> {
        &self.role_grants
    }

    /// Replace the active roles.
    ///
    /// # Returns
    ///
    /// `true` if the roles changed and the set was recomputed
    pub fn set_active_roles<I, S>(&mut self, active_roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let active_roles: Vec<String> = active_roles.into_iter().map(Into::into).collect();
        if active_roles == self.active_roles {
            return false;
        }
        self.active_roles = active_roles;
        self.recompute("active_roles");
        true
    }

    /// Replace the role grant table.
    ///
    /// # Returns
    ///
    /// `true` if a different table was installed and the set was recomputed
    pub fn set_role_grants(&mut self, role_grants: Arc<RoleGrants>) -> bool {
        if Arc::ptr_eq(&role_grants, &self.role_grants) {
            return false;
        }
        self.role_grants = role_grants;
        self.recompute("role_grants");
        true
    }

    /// Replace the permission tree.
    ///
    /// # Returns
    ///
    /// `true` if a different tree was installed and the set was recomputed
    pub fn set_tree(&mut self, tree: Arc<PermissionTree>) -> bool {
        if Arc::ptr_eq(&tree, &self.tree) {
            return false;
        }
        self.tree = tree;
        self.declared = self.tree.flatten();
        self.recompute("tree");
        true
    }

    fn recompute(&mut self, changed: &'static str) {
        self.permissions = resolve_declared(&self.declared, &self.role_grants, self.active_roles.as_slice());
        debug!(
            changed,
            roles = ?self.active_roles,
            permissions = self.permissions.len(),
            "Recomputed permitted access"
        );
    }
}
