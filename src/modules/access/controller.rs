use axum::{Json, extract::State};
use tracing::{debug, instrument};

use stockwise_core::AppError;

use crate::middleware::auth::CurrentUser;
use crate::modules::access::model::AccessResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/me/access",
    responses(
        (status = 200, description = "Effective access of the authenticated user", body = AccessResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(user_id = %current.0.id))]
pub async fn get_my_access(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<AccessResponse>, AppError> {
    let user = current.0;
    debug!(access_mode = ?user.access_mode(), "Evaluating access");

    Ok(Json(AccessResponse::evaluate(
        user.id,
        &user.access(),
        &state.structure,
    )))
}
