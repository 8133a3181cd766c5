//! End-to-end tests for permission resolution.
//!
//! These tests drive the public API with a JSON-declared tree and role table,
//! the way a consuming service loads them, and check resolution from many
//! tasks at once against shared inputs.

use permitted_core::{resolve, PermissionSet, PermissionTree, RoleGrants};
use std::sync::Arc;

/// Tree and role table shared by the tests.
struct Fixture {
    /// Declared permissions.
    tree: PermissionTree,
    /// Role grants.
    roles: RoleGrants,
}

impl Fixture {
    fn new() -> Self {
        let tree = serde_json::from_str(
            r#"{
                "orders": {
                    "read": "orders.read",
                    "write": "orders.write",
                    "delete": "orders.delete"
                },
                "users": {
                    "read": "users.read",
                    "write": "users.write",
                    "profile": { "write": "users.profile.write" }
                },
                "reports": { "export": "reports.export", "disabled": null }
            }"#,
        )
        .unwrap();

        let roles = serde_json::from_str(
            r#"{
                "viewer":  ["orders.read", "users.read"],
                "support": ["users.profile.write"],
                "manager": ["orders.*", "reports.*"],
                "admin":   ["orders.*", "users.*", "reports.*"]
            }"#,
        )
        .unwrap();

        Self { tree, roles }
    }

    fn resolve(&self, active: &[&str]) -> PermissionSet {
        resolve(&self.tree, &self.roles, active)
    }
}

fn sorted(set: &PermissionSet) -> Vec<String> {
    set.to_sorted_vec().into_iter().map(|p| p.into_string()).collect()
}

#[test]
fn test_viewer_gets_exact_grants() {
    let fixture = Fixture::new();
    assert_eq!(sorted(&fixture.resolve(&["viewer"])), vec!["orders.read", "users.read"]);
}

#[test]
fn test_nested_write_implies_nested_read() {
    let fixture = Fixture::new();
    let set = fixture.resolve(&["support"]);

    assert!(set.has("users.profile.write"));
    assert!(set.has("users.profile.read"));
    assert!(!set.has("users.read"));
}

#[test]
fn test_admin_gets_everything_declared() {
    let fixture = Fixture::new();
    let set = fixture.resolve(&["admin"]);

    for declared in fixture.tree.flatten() {
        assert!(set.has(declared.as_str()), "missing {declared}");
    }
    assert!(set.has("users.profile.read"));
}

#[test]
fn test_role_order_does_not_matter() {
    let fixture = Fixture::new();
    assert_eq!(
        fixture.resolve(&["viewer", "support", "manager"]),
        fixture.resolve(&["manager", "support", "viewer"])
    );
}

#[test]
fn test_unknown_and_repeated_roles() {
    let fixture = Fixture::new();
    assert!(fixture.resolve(&["ghost"]).is_empty());
    assert_eq!(fixture.resolve(&["viewer", "viewer", "ghost"]), fixture.resolve(&["viewer"]));
}

#[tokio::test]
async fn test_concurrent_resolution_shares_inputs() {
    let fixture = Arc::new(Fixture::new());
    let expected = fixture.resolve(&["manager", "support"]);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let fixture = Arc::clone(&fixture);
        handles.push(tokio::spawn(async move { fixture.resolve(&["support", "manager"]) }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}
