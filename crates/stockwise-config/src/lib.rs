//! # Stockwise Config
//!
//! Configuration types for the Stockwise API, loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`permissions`]: where the permission structure comes from
//! - [`server`]: bind address and storage backend
//!
//! # Example
//!
//! ```ignore
//! use stockwise_config::{CorsConfig, JwtConfig, PermissionsConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let structure = PermissionsConfig::from_env().load_structure()?;
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod permissions;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use permissions::PermissionsConfig;
pub use server::ServerConfig;

/// Reads a variable from the process environment.
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
