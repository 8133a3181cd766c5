//! # Permitted Access
//!
//! Permission queries for application code, built on `permitted-core`.
//!
//! ## Overview
//!
//! The permitted-access crate handles:
//! - **Access**: Resolved permissions for one session's active roles
//! - **Context**: An explicit slot that fails loudly when queried uninitialized
//! - **Gates**: Show-if-permitted and route guard decisions
//! - **Config**: Loading the permission tree and role grants from JSON
//!
//! ## Architecture
//!
//! ```text
//! AccessConfig (JSON)
//!   ├─ PermissionTree ─┐
//!   └─ RoleGrants ─────┼─→ PermittedAccess ─→ AccessContext
//!       active roles ──┘          │
//!                                 ├─ Requirement / show_if_permitted
//!                                 └─ RouteGuard
//! ```
//!
//! There is no global state: build a `PermittedAccess` per request or session
//! and pass it (or an `AccessContext` holding it) to whatever needs it.
//!
//! ## Usage
//!
//! ```rust
//! use permitted_access::{AccessConfig, Requirement, RouteDecision, RouteGuard};
//!
//! let config = AccessConfig::from_json_str(r#"{
//!     "permissions": {
//!         "orders": { "read": "orders.read", "write": "orders.write" },
//!         "users":  { "read": "users.read" }
//!     },
//!     "roles": { "clerk": ["orders.write"] }
//! }"#).unwrap();
//!
//! let access = config.access_for(["clerk"]);
//! assert!(access.has_permission("orders.read"));
//! assert!(Requirement::some(["users.read", "orders.write"]).is_satisfied_by(&access));
//! assert_eq!(
//!     RouteGuard::new("users.read").check(&access),
//!     RouteDecision::Redirect("/dashboard".to_string())
//! );
//! ```

pub mod access;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;

// Re-export main types for convenience
pub use access::PermittedAccess;
pub use config::{AccessConfig, UndeclaredGrant, CONFIG_PATH_ENV};
pub use context::AccessContext;
pub use error::{AccessError, AccessResult};
pub use gate::{show_if_permitted, Requirement, RouteDecision, RouteGuard, DEFAULT_REDIRECT};
