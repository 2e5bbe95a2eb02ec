//! # Stockwise Auth
//!
//! JWT claims and token utilities for the Stockwise API.
//!
//! - [`claims`]: access token claims
//! - [`jwt`]: token creation and verification
//!
//! Tokens only identify the caller. What the caller may do is decided per
//! request from the stored user record, so permission edits apply without
//! re-issuing tokens.
//!
//! # Example
//!
//! ```ignore
//! use stockwise_auth::{create_access_token, verify_token};
//! use stockwise_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "ops@example.com", "Manager", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
