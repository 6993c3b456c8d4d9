//! Canned accounts shared by the fixture port implementations.

use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, Error, Role, User, UserId, Username};

/// Identifier of the fixture administrator.
pub const FIXTURE_ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// Identifier of the fixture regular member.
pub const FIXTURE_MEMBER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn fixture_user(id: &str, username: &str, email: &str, role: Role) -> Result<User, Error> {
    let invalid = |err: crate::domain::UserValidationError| {
        Error::internal(format!("invalid fixture user: {err}"))
    };
    Ok(User::new(
        UserId::new(id).map_err(invalid)?,
        Username::new(username).map_err(invalid)?,
        EmailAddress::new(email).map_err(invalid)?,
        role,
        DateTime::<Utc>::UNIX_EPOCH,
    ))
}

/// The fixture administrator, `admin`.
pub fn fixture_admin() -> Result<User, Error> {
    fixture_user(FIXTURE_ADMIN_ID, "admin", "admin@vidensbank.dk", Role::Admin)
}

/// The fixture regular member, `anna`.
pub fn fixture_member() -> Result<User, Error> {
    fixture_user(FIXTURE_MEMBER_ID, "anna", "anna@vidensbank.dk", Role::User)
}
