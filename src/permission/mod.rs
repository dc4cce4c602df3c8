//! Permission checks for the requesting principal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Answers whether the current principal holds a permission codename.
pub trait PermissionChecker {
    fn has_perm(&self, perm: &str) -> bool;
}

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub permissions: HashSet<String>,
}

impl Principal {
    /// Active staff members may enter the admin site.
    pub fn can_access_admin(&self) -> bool {
        self.is_active && self.is_staff
    }
}

impl PermissionChecker for Principal {
    /// Inactive principals hold nothing, active superusers hold everything.
    fn has_perm(&self, perm: &str) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_superuser || self.permissions.contains(perm)
    }
}

/// Plain permission sets, used as checkers by the navigation tests.
#[cfg(test)]
impl PermissionChecker for HashSet<String> {
    fn has_perm(&self, perm: &str) -> bool {
        self.contains(perm)
    }
}
