//! # Permitted Core
//!
//! Resolves the concrete permissions held by a set of active roles.
//!
//! ## Overview
//!
//! The permitted-core crate handles:
//! - **Permission Tree**: The nested declaration of every valid permission
//! - **Grants**: Concrete permissions or `prefix.*` wildcards held by roles
//! - **Role Grants**: The flat role → grants table
//! - **Resolution**: Flattening, grant matching and write-implies-read
//!
//! ## Architecture
//!
//! ```text
//! Permission = dot-separated path
//!
//! Examples:
//!   "orders.read"            - Read orders
//!   "users.profile.write"    - Edit user profiles
//!
//! Grant = Permission | prefix.*
//!
//! Examples:
//!   "orders.read"            - Exactly orders.read
//!   "users.*"                - users, users.read, users.profile.write, ...
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use permitted_core::{resolve, PermissionTree, RoleGrants};
//!
//! let tree: PermissionTree = serde_json::from_str(r#"{
//!     "orders": { "read": "orders.read", "write": "orders.write", "delete": "orders.delete" },
//!     "users":  { "read": "users.read" }
//! }"#).unwrap();
//!
//! let roles = RoleGrants::new()
//!     .with_role("user", ["orders.read"])
//!     .with_role("admin", ["orders.*"]);
//!
//! let set = resolve(&tree, &roles, &["admin"]);
//! assert!(set.has("orders.delete"));
//! assert!(!set.has("users.read"));
//! ```
//!
//! ## Write Implies Read
//!
//! Any resolved `x.write` also grants `x.read`, whether or not the tree
//! declares `x.read`.
//!
//! ## Thread Safety
//!
//! All types are plain owned data and every function is pure, so they can be
//! shared across threads behind an `Arc` without locking.

pub mod grant;
pub mod permission;
pub mod resolve;
pub mod roles;
pub mod tree;

// Re-export main types for convenience
pub use grant::{matches_permission, Grant};
pub use permission::{PermissionId, PermissionSet};
pub use resolve::{expand_reads, resolve, resolve_declared, resolve_for_roles, resolve_grants};
pub use roles::RoleGrants;
pub use tree::{flatten, PermissionNode, PermissionTree};
