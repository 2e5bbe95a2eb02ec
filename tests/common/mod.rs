use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use stockwise::router::init_router;
use stockwise::state::AppState;
use stockwise_auth::create_access_token;
use stockwise_config::{CorsConfig, JwtConfig};
use stockwise_db::{InMemoryUserRepository, UserRepository};
use stockwise_models::{User, UserId};
use stockwise_permissions::{PermissionStore, Role, builtin_structure};
use tower::ServiceExt;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub struct TestApp {
    pub repo: Arc<InMemoryUserRepository>,
    pub router: Router,
}

impl TestApp {
    pub fn new(users: Vec<User>) -> Self {
        let repo = Arc::new(InMemoryUserRepository::with_users(users));
        let state = AppState::new(
            repo.clone() as Arc<dyn UserRepository>,
            builtin_structure(),
            jwt_config(),
            CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        );
        Self {
            repo,
            router: init_router(state),
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn admin(email: &str) -> User {
    user(email, Role::Admin, None, None)
}

pub fn manager(email: &str, permissions: PermissionStore) -> User {
    user(email, Role::Manager, Some(permissions), None)
}

#[allow(dead_code)]
pub fn legacy_manager(email: &str, modules: &[&str]) -> User {
    user(
        email,
        Role::Manager,
        None,
        Some(modules.iter().map(|m| m.to_string()).collect()),
    )
}

fn user(
    email: &str,
    role: Role,
    permissions: Option<PermissionStore>,
    module_access: Option<Vec<String>>,
) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        role,
        permissions,
        module_access,
        created_at: now,
        updated_at: now,
    }
}

pub fn token_for(user: &User) -> String {
    create_access_token(
        user.id.into_inner(),
        &user.email,
        user.role.as_str(),
        &jwt_config(),
    )
    .unwrap()
}

/// A store granting exactly the listed `(submodule, action)` pairs.
pub fn grants(pairs: &[(&str, &str)]) -> PermissionStore {
    let mut store = PermissionStore::all_denied(&builtin_structure());
    for (submodule, action) in pairs {
        store.set(submodule, action, true);
    }
    store
}
