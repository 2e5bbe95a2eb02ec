use std::sync::Arc;

use anyhow::Context;
use stockwise_auth::create_access_token;
use stockwise_config::{CorsConfig, JwtConfig, PermissionsConfig, ServerConfig};
use stockwise_db::{InMemoryUserRepository, PgUserRepository, UserRepository, init_db_pool, run_migrations};
use stockwise_models::User;
use stockwise_permissions::{PermissionStructure, Role};

/// Shared application state.
///
/// The permission structure is loaded once at startup and is read-only from
/// then on.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub structure: Arc<PermissionStructure>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        structure: PermissionStructure,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users,
            structure: Arc::new(structure),
            jwt_config,
            cors_config,
        }
    }
}

/// Creates the admin account for an in-memory run and mints its token.
pub async fn seed_admin(
    users: &dyn UserRepository,
    email: &str,
    jwt_config: &JwtConfig,
) -> anyhow::Result<(User, String)> {
    let admin = users
        .insert(User::provision("Admin", email, Role::Admin, None))
        .await
        .map_err(|e| e.error)
        .context("Failed to seed admin")?;

    let token = create_access_token(admin.id.into_inner(), &admin.email, admin.role.as_str(), jwt_config)
        .map_err(|e| e.error)
        .context("Failed to mint admin token")?;

    Ok((admin, token))
}

pub async fn init_app_state(server: &ServerConfig) -> anyhow::Result<AppState> {
    let structure = PermissionsConfig::from_env()
        .load_structure()
        .context("Invalid permission structure")?;
    let jwt_config = JwtConfig::from_env();

    let users: Arc<dyn UserRepository> = if server.in_memory {
        tracing::warn!("STOCKWISE_IN_MEMORY is set; users are not persisted");
        let users = InMemoryUserRepository::new();
        match &server.seed_admin_email {
            Some(email) => {
                let (admin, token) = seed_admin(&users, email, &jwt_config).await?;
                tracing::warn!(user_id = %admin.id, email = %admin.email, token = %token, "Seeded in-memory admin");
            }
            None => tracing::warn!(
                "No STOCKWISE_SEED_ADMIN_EMAIL; the in-memory store starts empty and every request is unauthorized"
            ),
        }
        Arc::new(users)
    } else {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let pool = init_db_pool(&database_url)
            .await
            .context("Failed to connect to database")?;
        run_migrations(&pool).await.context("Failed to run migrations")?;
        Arc::new(PgUserRepository::new(pool))
    };

    Ok(AppState::new(
        users,
        structure,
        jwt_config,
        CorsConfig::from_env(),
    ))
}
