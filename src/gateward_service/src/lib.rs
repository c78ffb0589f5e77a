mod auth_service;
pub mod tracing;

pub use auth_service::AuthService;
pub use self::tracing::init_tracing;
