//! Access configuration
//!
//! Loads the permission tree and role grant table from a single JSON
//! document:
//!
//! ```json
//! {
//!   "permissions": {
//!     "orders": { "read": "orders.read", "write": "orders.write" }
//!   },
//!   "roles": {
//!     "user":  ["orders.read"],
//!     "admin": ["orders.*"]
//!   }
//! }
//! ```
//!
//! The document path can come from the `PERMITTED_CONFIG` environment
//! variable.

use permitted_core::{Grant, PermissionTree, RoleGrants};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::access::PermittedAccess;
use crate::error::{AccessError, AccessResult};

/// Environment variable holding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "PERMITTED_CONFIG";

/// Permission tree and role grants for an application.
///
/// Both parts are held behind `Arc`, so every session built from one config
/// shares the same declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Declared permissions.
    #[serde(default)]
    pub permissions: Arc<PermissionTree>,

    /// Grants per role.
    #[serde(default)]
    pub roles: Arc<RoleGrants>,
}

/// A grant that covers no declared permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredGrant {
    /// Role holding the grant.
    pub role: String,
    /// The grant itself.
    pub grant: Grant,
}

impl AccessConfig {
    /// Create a configuration from its parts.
    pub fn new(permissions: PermissionTree, roles: RoleGrants) -> Self {
        Self {
            permissions: Arc::new(permissions),
            roles: Arc::new(roles),
        }
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use permitted_access::AccessConfig;
    ///
    /// let config = AccessConfig::from_json_str(r#"{
    ///     "permissions": { "orders": { "read": "orders.read" } },
    ///     "roles": { "user": ["orders.read"] }
    /// }"#).unwrap();
    ///
    /// assert!(config.access_for(["user"]).has_permission("orders.read"));
    /// ```
    pub fn from_json_str(json: &str) -> AccessResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> AccessResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| AccessError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;

        info!(
            path = %path.display(),
            roles = config.roles.len(),
            "Loaded access configuration"
        );
        Ok(config)
    }

    /// Load configuration from the file named by `PERMITTED_CONFIG`.
    pub fn from_env() -> AccessResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map_err(|_| AccessError::MissingEnvVar(CONFIG_PATH_ENV.to_string()))?;
        Self::from_path(path)
    }

    /// Split into shareable parts for building many `PermittedAccess` values.
    pub fn into_shared(self) -> (Arc<PermissionTree>, Arc<RoleGrants>) {
        (self.permissions, self.roles)
    }

    /// Resolve access for the given active roles.
    pub fn access_for<I, S>(&self, active_roles: I) -> PermittedAccess
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PermittedAccess::new(
            Arc::clone(&self.permissions),
            Arc::clone(&self.roles),
            active_roles,
        )
    }

    /// List grants that cover no declared permission.
    ///
    /// Such grants are harmless at resolution time; this is for reporting
    /// typos in configuration, not for rejecting it.
    pub fn undeclared_grants(&self) -> Vec<UndeclaredGrant> {
        let declared = self.permissions.flatten();
        let mut undeclared: Vec<UndeclaredGrant> = self
            .roles
            .iter()
            .filter(|(_, grant)| !declared.iter().any(|p| grant.matches(p.as_str())))
            .map(|(role, grant)| UndeclaredGrant {
                role: role.to_string(),
                grant: grant.clone(),
            })
            .collect();
        undeclared.sort_by(|a, b| {
            (a.role.as_str(), a.grant.to_string()).cmp(&(b.role.as_str(), b.grant.to_string()))
        });

        for entry in &undeclared {
            debug!(role = %entry.role, grant = %entry.grant, "Grant covers no declared permission");
        }
        undeclared
    }
}
