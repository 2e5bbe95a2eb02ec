//! # Stockwise DB
//!
//! Database pool and user persistence for the Stockwise API.
//!
//! - [`init_db_pool`] / [`run_migrations`]: Postgres setup at startup
//! - [`UserRepository`]: the storage seam the services talk to
//! - [`PgUserRepository`]: SQLx implementation over the `users` table
//! - [`InMemoryUserRepository`]: map-backed implementation for tests and
//!   local runs without a database
//! - [`clone_user_permissions`]: the clone workflow used by the API and CLI
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stockwise_db::{PgUserRepository, UserRepository, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
//! ```

pub mod memory;
pub mod permissions;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryUserRepository;
pub use permissions::clone_user_permissions;
pub use postgres::PgUserRepository;
pub use repository::UserRepository;

pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}

/// Applies the migrations under the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
