//! Account role names.
//!
//! These must match the `ck_users_role` check constraint in the initial
//! migration. Administration is not a role: the admin API is gated by a
//! shared secret instead.

pub const ROLE_ARTIST: &str = "artist";
pub const ROLE_STUDIO: &str = "studio";

/// All roles a user may register with.
pub const VALID_ROLES: &[&str] = &[ROLE_ARTIST, ROLE_STUDIO];

/// Validate that the role is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
