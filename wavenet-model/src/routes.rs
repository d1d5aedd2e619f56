//! Backend route constants.

/// Current user resource. `GET` returns the snapshot, `PATCH` updates it.
pub const AUTH_USER: &str = "/auth/user";

/// Identity provider route used to change the signed-in user's password.
pub const IDENTITY_ACCOUNTS_UPDATE: &str = "/v1/accounts:update";
