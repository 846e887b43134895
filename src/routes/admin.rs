//! Admin dashboard handlers: the real review transition, the advisory
//! pre-review, and the full-record lookup.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::error::{AppError, AppResult};
use crate::review::{prereview, workflow};
use crate::sar;
use crate::state::AppState;

pub async fn verify_student(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(request): Json<workflow::VerifyStudentRequest>,
) -> AppResult<Json<sar::StudentSummary>> {
    auth.require_admin()?;
    Ok(Json(workflow::verify_student(&state, request).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreReviewRequest {
    pub student_id: Uuid,
}

/// Advisory only: recompute a candidate decision from the stored profile.
/// Nothing is written; the admin still drives the real transition.
pub async fn pre_review(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(request): Json<PreReviewRequest>,
) -> AppResult<Json<prereview::PreReview>> {
    auth.require_admin()?;

    let student = db::get_student(state.pool.as_ref(), request.student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let profile = serde_json::from_str(&student.profile)
        .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));

    Ok(Json(prereview::evaluate(&profile)))
}

pub async fn lookup_by_enrollment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(enrollment_no): Path<String>,
) -> AppResult<Json<sar::CompleteSar>> {
    auth.require_admin()?;
    Ok(Json(
        sar::admin_by_enrollment(state.pool.as_ref(), &enrollment_no).await?,
    ))
}
