//! # Resolution
//!
//! Turns a permission tree, a role grant table and a list of active roles
//! into the concrete set of permissions those roles hold.
//!
//! ```text
//! tree ──flatten──► declared ─┐
//!                             ├─► resolve_grants ─► expand_reads ─► PermissionSet
//! roles + active ──collect──► grants
//! ```
//!
//! Every function here is pure and total: malformed tree nodes are skipped,
//! unknown roles contribute nothing and grants that cover nothing are inert.

use std::borrow::Borrow;

use tracing::{debug, instrument};

use crate::grant::Grant;
use crate::permission::{PermissionId, PermissionSet};
use crate::roles::RoleGrants;
use crate::tree::PermissionTree;

/// Filter declared permissions down to those covered by at least one grant.
///
/// Grants naming permissions that are not declared have no effect, and an
/// empty grant list resolves to an empty set.
///
/// # Example
///
/// ```
/// use permitted_core::{grant::Grant, permission::PermissionId, resolve::resolve_grants};
///
/// let all: Vec<PermissionId> = ["users", "users.read", "orders.read"]
///     .into_iter()
///     .map(PermissionId::from)
///     .collect();
///
/// let set = resolve_grants(&all, &[Grant::parse("users.*")]);
/// assert!(set.has("users") && set.has("users.read"));
/// assert!(!set.has("orders.read"));
/// ```
pub fn resolve_grants<G>(all_permissions: &[PermissionId], grants: &[G]) -> PermissionSet
where
    G: Borrow<Grant>,
{
    all_permissions
        .iter()
        .filter(|permission| {
            grants
                .iter()
                .any(|grant| grant.borrow().matches(permission.as_str()))
        })
        .cloned()
        .collect()
}

/// Add the implied `.read` permission for every `.write` permission present.
///
/// Never removes anything, and applying it twice is the same as once. The
/// implied read is added even when the tree does not declare it.
///
/// # Example
///
/// ```
/// use permitted_core::{permission::PermissionSet, resolve::expand_reads};
///
/// let set: PermissionSet = ["orders.write"].into_iter().collect();
/// let expanded = expand_reads(&set);
/// assert!(expanded.has("orders.write"));
/// assert!(expanded.has("orders.read"));
/// ```
pub fn expand_reads(permissions: &PermissionSet) -> PermissionSet {
    let mut expanded = permissions.clone();
    expanded.extend(permissions.iter().filter_map(PermissionId::implied_read));
    expanded
}

/// Resolve the permissions of the active roles against already-flattened
/// declarations.
///
/// Use this when the tree is long-lived and flattened once up front.
pub fn resolve_declared<S>(
    declared: &[PermissionId],
    role_grants: &RoleGrants,
    active_roles: &[S],
) -> PermissionSet
where
    S: AsRef<str>,
{
    let grants = role_grants.collect_grants(active_roles);
    let granted = resolve_grants(declared, &grants);
    let resolved = expand_reads(&granted);

    debug!(
        declared = declared.len(),
        grants = grants.len(),
        granted = granted.len(),
        resolved = resolved.len(),
        "Resolved permissions for active roles"
    );

    resolved
}

/// Resolve the full permission set of the active roles.
///
/// Flattens the tree once, unions the grants of every active role (unknown
/// roles hold nothing), filters the declared permissions through those grants
/// and finally applies write-implies-read. Roles only ever add permissions,
/// so the order of `active_roles` does not matter.
///
/// # Example
///
/// ```
/// use permitted_core::{resolve_for_roles, PermissionTree, RoleGrants};
///
/// let tree = PermissionTree::new().with("orders", PermissionTree::new()
///     .with("read", "orders.read")
///     .with("write", "orders.write"));
/// let roles = RoleGrants::new().with_role("clerk", ["orders.write"]);
///
/// let set = resolve_for_roles(&tree, &roles, &["clerk"]);
/// assert!(set.has("orders.write"));
/// assert!(set.has("orders.read"));
/// ```
#[instrument(level = "debug", skip_all, fields(active_roles = active_roles.len()))]
pub fn resolve_for_roles<S>(
    tree: &PermissionTree,
    role_grants: &RoleGrants,
    active_roles: &[S],
) -> PermissionSet
where
    S: AsRef<str>,
{
    let declared = tree.flatten();
    resolve_declared(&declared, role_grants, active_roles)
}

/// Alias of [`resolve_for_roles`], the single entry point consumers call.
pub fn resolve<S>(tree: &PermissionTree, role_grants: &RoleGrants, active_roles: &[S]) -> PermissionSet
where
    S: AsRef<str>,
{
    resolve_for_roles(tree, role_grants, active_roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declared(ids: &[&str]) -> Vec<PermissionId> {
        ids.iter().copied().map(PermissionId::from).collect()
    }

    fn set(ids: &[&str]) -> PermissionSet {
        ids.iter().copied().collect()
    }

    fn sample_tree() -> PermissionTree {
        serde_json::from_value(json!({
            "orders": {
                "read": "orders.read",
                "write": "orders.write",
                "delete": "orders.delete"
            },
            "users": { "read": "users.read" }
        }))
        .unwrap()
    }

    fn sample_roles() -> RoleGrants {
        RoleGrants::new()
            .with_role("user", ["orders.read"])
            .with_role("admin", ["orders.*"])
    }

    const ALL: &[&str] = &[
        "users",
        "users.read",
        "users.write",
        "users.profilePicture.write",
        "orders.read",
    ];

    #[test]
    fn test_resolve_exact_permission() {
        let result = resolve_grants(&declared(ALL), &[Grant::parse("users.read")]);
        assert_eq!(result, set(&["users.read"]));
    }

    #[test]
    fn test_resolve_wildcard() {
        let result = resolve_grants(&declared(ALL), &[Grant::parse("users.*")]);
        assert_eq!(
            result,
            set(&["users", "users.read", "users.write", "users.profilePicture.write"])
        );
    }

    #[test]
    fn test_resolve_combines_grants() {
        let grants = [Grant::parse("users.*"), Grant::parse("orders.read")];
        let result = resolve_grants(&declared(ALL), &grants);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_resolve_empty_grants() {
        let result = resolve_grants::<Grant>(&declared(ALL), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_resolve_nothing_matches() {
        let result = resolve_grants(
            &declared(ALL),
            &[Grant::parse("nonexistent.*"), Grant::parse("bogus.read")],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_expand_reads_adds_read() {
        let result = expand_reads(&set(&["orders.write"]));
        assert_eq!(result, set(&["orders.write", "orders.read"]));
    }

    #[test]
    fn test_expand_reads_keeps_existing() {
        let result = expand_reads(&set(&["orders.read"]));
        assert_eq!(result, set(&["orders.read"]));
    }

    #[test]
    fn test_expand_reads_multiple_writes() {
        let result = expand_reads(&set(&["users.write", "orders.write", "orders.read"]));
        assert!(result.has("users.read"));
        assert!(result.has("orders.read"));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_expand_reads_idempotent() {
        let input = set(&["a.write", "b.c.write", "d.read", "e"]);
        let once = expand_reads(&input);
        assert_eq!(expand_reads(&once), once);
    }

    #[test]
    fn test_roles_user() {
        let result = resolve_for_roles(&sample_tree(), &sample_roles(), &["user"]);
        assert_eq!(result, set(&["orders.read"]));
    }

    #[test]
    fn test_roles_admin_wildcard_stays_in_prefix() {
        let result = resolve_for_roles(&sample_tree(), &sample_roles(), &["admin"]);
        assert_eq!(result, set(&["orders.read", "orders.write", "orders.delete"]));
        assert!(!result.has("users.read"));
    }

    #[test]
    fn test_roles_union() {
        let tree = sample_tree();
        let roles = sample_roles();

        let both = resolve_for_roles(&tree, &roles, &["user", "admin"]);
        let mut expected = resolve_for_roles(&tree, &roles, &["user"]);
        expected.merge(&resolve_for_roles(&tree, &roles, &["admin"]));
        assert_eq!(both, expected);
        assert_eq!(both, resolve_for_roles(&tree, &roles, &["admin", "user"]));
    }

    #[test]
    fn test_roles_missing_role() {
        let roles = RoleGrants::new().with_role("user", ["orders.read"]);
        assert!(resolve_for_roles(&sample_tree(), &roles, &["admin"]).is_empty());
    }

    #[test]
    fn test_roles_no_active_roles() {
        let active: [&str; 0] = [];
        assert!(resolve(&sample_tree(), &sample_roles(), &active).is_empty());
    }

    #[test]
    fn test_write_implies_read() {
        let roles = RoleGrants::new().with_role("user", ["orders.write"]);
        let result = resolve_for_roles(&sample_tree(), &roles, &["user"]);
        assert_eq!(result, set(&["orders.write", "orders.read"]));
    }

    #[test]
    fn test_implied_read_need_not_be_declared() {
        let tree = PermissionTree::new().with("reports", PermissionTree::new().with("write", "reports.write"));
        let roles = RoleGrants::new().with_role("author", ["reports.*"]);

        let result = resolve_for_roles(&tree, &roles, &["author"]);
        assert!(result.has("reports.read"));
    }

    #[test]
    fn test_resolve_declared_matches_resolve_for_roles() {
        let tree = sample_tree();
        let roles = sample_roles();
        let flat = tree.flatten();

        assert_eq!(
            resolve_declared(&flat, &roles, &["admin"]),
            resolve_for_roles(&tree, &roles, &["admin"])
        );
    }
}
