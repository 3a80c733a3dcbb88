use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::Environment;

/// Name of the private cookie carrying the access token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Create the auth cookie holding the JWT.
///
/// HttpOnly and `SameSite=Lax` always; `Secure` everywhere except development so the
/// cookie still works over plain HTTP on localhost.
pub fn create_auth_cookie(
    token: String,
    environment: &Environment,
    expiry_hours: i64,
) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .max_age(time::Duration::hours(expiry_hours))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!environment.is_development())
        .build()
}

/// Cookie matching [`create_auth_cookie`]'s name and path, for removal on logout.
pub fn removal_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}
