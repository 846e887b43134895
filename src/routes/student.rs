use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::review::workflow;
use crate::sar;
use crate::state::AppState;

/// Resubmission of previously declined registration fields. The workflow
/// applies only the intersection with the stored declined set and flips the
/// application back to pending.
pub async fn update_declined(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(request): Json<workflow::UpdateDeclinedRequest>,
) -> AppResult<Json<sar::StudentSummary>> {
    Ok(Json(
        workflow::resubmit_declined(&state, auth.id, request).await?,
    ))
}
