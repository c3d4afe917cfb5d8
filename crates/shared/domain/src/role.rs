//! User role value object.

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER};

/// User roles enumeration.
///
/// Stored and transmitted as its canonical string form. Reads normalize:
/// unknown or absent input coerces to [`UserRole::User`] rather than failing,
/// so callers must not expect an invalid stored value to round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_SUPER_ADMIN => UserRole::SuperAdmin,
            _ => UserRole::User,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "{}", ROLE_USER),
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::SuperAdmin => write!(f, "{}", ROLE_SUPER_ADMIN),
        }
    }
}
