//! # Stockwise Core
//!
//! Shared application types for the Stockwise API.
//!
//! - [`errors`]: [`AppError`], the HTTP-aware error every handler returns
//!
//! # Example
//!
//! ```ignore
//! use stockwise_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let denied = AppError::forbidden("Missing permission managers:view");
//! ```

pub mod errors;

pub use errors::AppError;
