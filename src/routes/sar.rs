//! Student-facing SAR handlers. Thin: resolve identity, hand the payload to
//! the aggregate service, serialize the result.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::sar;
use crate::state::AppState;

pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> AppResult<Json<sar::SarOverview>> {
    Ok(Json(sar::overview(state.pool.as_ref(), auth.id).await?))
}

pub async fn put_overview(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<sar::UpdateOverviewRequest>,
) -> AppResult<Json<sar::SarOverview>> {
    Ok(Json(
        sar::update_overview(state.pool.as_ref(), auth.id, payload).await?,
    ))
}

pub async fn list_academic(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> AppResult<Json<Vec<sar::AcademicRecordResponse>>> {
    Ok(Json(sar::list_academic(state.pool.as_ref(), auth.id).await?))
}

pub async fn create_academic(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<sar::AcademicRecordPayload>,
) -> AppResult<impl IntoResponse> {
    let record = sar::create_academic(state.pool.as_ref(), auth.id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_academic(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(record_id): Path<Uuid>,
    Json(payload): Json<sar::AcademicRecordPayload>,
) -> AppResult<Json<sar::AcademicRecordResponse>> {
    Ok(Json(
        sar::update_academic(state.pool.as_ref(), auth.id, record_id, payload).await?,
    ))
}

pub async fn delete_academic(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(record_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    sar::delete_academic(state.pool.as_ref(), auth.id, record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_internships(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> AppResult<Json<Vec<sar::InternshipResponse>>> {
    Ok(Json(
        sar::list_internships(state.pool.as_ref(), auth.id).await?,
    ))
}

pub async fn create_internship(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<sar::InternshipPayload>,
) -> AppResult<impl IntoResponse> {
    let record = sar::create_internship(state.pool.as_ref(), auth.id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_internship(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(record_id): Path<Uuid>,
    Json(payload): Json<sar::InternshipPayload>,
) -> AppResult<Json<sar::InternshipResponse>> {
    Ok(Json(
        sar::update_internship(state.pool.as_ref(), auth.id, record_id, payload).await?,
    ))
}

pub async fn delete_internship(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(record_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    sar::delete_internship(state.pool.as_ref(), auth.id, record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_achievements(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> AppResult<Json<Vec<sar::AchievementResponse>>> {
    Ok(Json(
        sar::list_achievements(state.pool.as_ref(), auth.id).await?,
    ))
}

pub async fn create_achievement(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<sar::AchievementPayload>,
) -> AppResult<impl IntoResponse> {
    let record = sar::create_achievement(state.pool.as_ref(), auth.id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_achievement(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(record_id): Path<Uuid>,
    Json(payload): Json<sar::AchievementPayload>,
) -> AppResult<Json<sar::AchievementResponse>> {
    Ok(Json(
        sar::update_achievement(state.pool.as_ref(), auth.id, record_id, payload).await?,
    ))
}

pub async fn delete_achievement(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(record_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    sar::delete_achievement(state.pool.as_ref(), auth.id, record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> AppResult<Json<sar::CompleteSar>> {
    Ok(Json(
        sar::complete_record(state.pool.as_ref(), auth.id).await?,
    ))
}

pub async fn statistics(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> AppResult<Json<sar::SarStatistics>> {
    Ok(Json(sar::statistics(state.pool.as_ref(), auth.id).await?))
}

pub async fn public_lookup(
    State(state): State<Arc<AppState>>,
    Path(enrollment_no): Path<String>,
) -> AppResult<Json<sar::PublicSarProfile>> {
    Ok(Json(
        sar::public_by_enrollment(state.pool.as_ref(), &enrollment_no).await?,
    ))
}
