//! The authenticated identity performing an operation.

use super::user::Role;

/// Who is asking.
///
/// Built by the HTTP layer from a verified bearer token and passed explicitly
/// into every operation that needs it. Core code never looks up a "current
/// user" on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user(user_id: i64) -> Self {
        Self::new(user_id, Role::User)
    }

    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
