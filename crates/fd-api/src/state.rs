use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;

use crate::{
    ApiConfig,
    config::{ConfigError, Environment},
};

/// Application context shared by every handler.
///
/// Built once at startup from the configuration and the database pool, then handed
/// to the router with `with_state`.
#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub cookie_key: Key,
    pub environment: Environment,
    pub bcrypt_cost: u32,
}

/// The subset of state the authentication extractor needs.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl ApiState {
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, ConfigError> {
        let cookie_key = Key::try_from(config.cookie_secret.as_bytes())
            .map_err(|_| ConfigError::CookieSecretTooShort)?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret,
            jwt_expiry_hours: config.jwt_expiry_hours,
            cookie_key,
            environment: config.env,
            bcrypt_cost: config.bcrypt_cost,
        })
    }
}

impl FromRef<ApiState> for Key {
    fn from_ref(state: &ApiState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        Self {
            jwt_secret: state.jwt_secret.clone(),
        }
    }
}

impl FromRef<ApiState> for PgPool {
    fn from_ref(state: &ApiState) -> Self {
        state.pool.clone()
    }
}
