use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_structure, toggle_draft};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/structure", get(get_structure))
        .route("/draft/toggle", post(toggle_draft))
}
