//! Axum route handlers for resume documents.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::resume::Resume;
use crate::state::AppState;

pub const RESUME_NOT_FOUND: &str = "Resume not found";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: String,
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn not_found() -> AppError {
    AppError::NotFound(RESUME_NOT_FOUND.to_string())
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    AppJson(mut resume): AppJson<Resume>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    if resume
        .user_id
        .as_deref()
        .map_or(true, |id| id.trim().is_empty())
    {
        return Err(AppError::Validation("userId is required".to_string()));
    }

    let now = now_timestamp();
    resume.id = Some(Uuid::new_v4().to_string());
    resume.created_at = Some(now.clone());
    resume.updated_at = Some(now);
    resume.assign_missing_entry_ids();

    state.resumes.insert_resume(&resume).await?;
    info!(
        "Created resume {} for user {}",
        resume.id.as_deref().unwrap_or_default(),
        resume.user_id.as_deref().unwrap_or_default()
    );

    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/resumes?userId=...
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<Resume>>, AppError> {
    let resumes = state.resumes.list_resumes_by_user(&params.user_id).await?;
    Ok(Json(resumes))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let resume = state.resumes.find_resume(&id).await?.ok_or_else(not_found)?;
    Ok(Json(resume))
}

/// PUT /api/resumes/:id
///
/// Replaces the document contents. Identity, ownership and creation time
/// always come from the stored document.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(mut resume): AppJson<Resume>,
) -> Result<Json<Resume>, AppError> {
    let existing = state.resumes.find_resume(&id).await?.ok_or_else(not_found)?;

    resume.id = existing.id;
    resume.user_id = existing.user_id;
    resume.created_at = existing.created_at;
    resume.updated_at = Some(now_timestamp());
    resume.assign_missing_entry_ids();

    // Lost a race with a concurrent delete.
    if !state.resumes.replace_resume(&resume).await? {
        return Err(not_found());
    }

    Ok(Json(resume))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.resumes.delete_resume(&id).await? {
        return Err(not_found());
    }
    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}
