//! # Stockwise CLI
//!
//! Administrative commands for permission management. The binary in
//! `main.rs` parses arguments and prints; the work lives in [`commands`] so it
//! can run against any [`stockwise_db::UserRepository`].

pub mod commands;
