use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    clone_manager_permissions, get_manager_permissions, list_managers, save_manager_permissions,
};

pub fn init_managers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_managers))
        .route(
            "/{id}/permissions",
            get(get_manager_permissions).put(save_manager_permissions),
        )
        .route("/{id}/permissions/clone", post(clone_manager_permissions))
}
