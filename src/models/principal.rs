#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn from_header(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// Authenticated caller, resolved upstream and passed to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can_access(&self, owner_id: i64) -> bool {
        self.is_admin() || self.user_id == owner_id
    }

    /// Owner filter for fleet queries; `None` means every vehicle.
    pub fn owner_scope(&self) -> Option<i64> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_header() {
        assert_eq!(Role::from_header("admin"), Role::Admin);
        assert_eq!(Role::from_header(" Admin "), Role::Admin);
        assert_eq!(Role::from_header("user"), Role::User);
        assert_eq!(Role::from_header(""), Role::User);
    }

    #[test]
    fn test_owner_can_access_own_vehicle_only() {
        let user = Principal::new(3, Role::User);
        assert!(user.can_access(3));
        assert!(!user.can_access(4));
        assert_eq!(user.owner_scope(), Some(3));
    }

    #[test]
    fn test_admin_can_access_everything() {
        let admin = Principal::new(1, Role::Admin);
        assert!(admin.can_access(1));
        assert!(admin.can_access(42));
        assert_eq!(admin.owner_scope(), None);
    }
}
