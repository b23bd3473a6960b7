//! Identity models.

use crate::uuids::TypedUuid;

/// Marker for user-scoped identifiers. The user entity itself is owned by
/// the account system, not by this service.
#[derive(Debug, Clone, Copy)]
pub struct UserRef;

/// User UUID
pub type UserUuid = TypedUuid<UserRef>;

/// The authenticated caller of an operation.
///
/// Supplied by the auth middleware on every request; domain services trust it
/// without re-verifying credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user: UserUuid,
    pub is_admin: bool,
}

impl Principal {
    #[must_use]
    pub const fn customer(user: UserUuid) -> Self {
        Self {
            user,
            is_admin: false,
        }
    }

    #[must_use]
    pub const fn admin(user: UserUuid) -> Self {
        Self {
            user,
            is_admin: true,
        }
    }
}
