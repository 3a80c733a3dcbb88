pub mod cookies;
pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;
pub mod routes;

pub use middleware::AuthUser;
pub use ownership::ensure_owner;
pub use routes::routes;
