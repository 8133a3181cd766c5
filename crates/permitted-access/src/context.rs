//! Access context slot
//!
//! An explicitly passed holder for a session's `PermittedAccess`. Code that
//! receives a context may run before access has been installed; in that case
//! every query fails with `AccessError::ContextMissing` instead of quietly
//! answering "no".

use tracing::warn;

use crate::access::PermittedAccess;
use crate::error::{AccessError, AccessResult};

/// Holder for the access of the current session.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use permitted_access::{AccessContext, AccessError, PermittedAccess};
/// use permitted_core::{PermissionTree, RoleGrants};
///
/// let mut ctx = AccessContext::empty();
/// assert!(matches!(ctx.has_permission("orders.read"), Err(AccessError::ContextMissing)));
///
/// let tree = Arc::new(PermissionTree::new().with("read", "orders.read"));
/// let roles = Arc::new(RoleGrants::new().with_role("user", ["orders.read"]));
/// ctx.install(PermittedAccess::new(tree, roles, ["user"]));
///
/// assert!(ctx.has_permission("orders.read").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    access: Option<PermittedAccess>,
}

impl AccessContext {
    /// Create a context with no access installed.
    pub fn empty() -> Self {
        Self { access: None }
    }

    /// Create a context holding `access`.
    pub fn new(access: PermittedAccess) -> Self {
        Self {
            access: Some(access),
        }
    }

    /// Install access, returning whatever was installed before.
    pub fn install(&mut self, access: PermittedAccess) -> Option<PermittedAccess> {
        self.access.replace(access)
    }

    /// Remove the installed access, for example on logout.
    pub fn clear(&mut self) -> Option<PermittedAccess> {
        self.access.take()
    }

    /// Check whether access has been installed.
    pub fn is_initialized(&self) -> bool {
        self.access.is_some()
    }

    /// Borrow the installed access.
    ///
    /// # Errors
    ///
    /// `AccessError::ContextMissing` if nothing has been installed
    pub fn access(&self) -> AccessResult<&PermittedAccess> {
        self.access.as_ref().ok_or_else(|| {
            warn!("Permission query made before access was installed");
            AccessError::ContextMissing
        })
    }

    /// Mutably borrow the installed access, e.g. to switch active roles.
    ///
    /// # Errors
    ///
    /// `AccessError::ContextMissing` if nothing has been installed
    pub fn access_mut(&mut self) -> AccessResult<&mut PermittedAccess> {
        self.access.as_mut().ok_or(AccessError::ContextMissing)
    }

    /// Check a single permission through the installed access.
    pub fn has_permission(&self, permission: &str) -> AccessResult<bool> {
        Ok(self.access()?.has_permission(permission))
    }

    /// Check that at least one permission is held through the installed access.
    pub fn has_some_permission<I, S>(&self, permissions: I) -> AccessResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.access()?.has_some_permission(permissions))
    }

    /// Check that every permission is held through the installed access.
    pub fn has_every_permission<I, S>(&self, permissions: I) -> AccessResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.access()?.has_every_permission(permissions))
    }
}

impl From<PermittedAccess> for AccessContext {
    fn from(access: PermittedAccess) -> Self {
        Self::new(access)
    }
}
