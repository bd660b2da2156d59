//! Axum route handlers for user records.
//!
//! Passwords arrive already hashed; hashing and credential checks belong to the
//! identity service in front of this API.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::{User, UserProfile};
use crate::state::AppState;

pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

/// Replacement contents for an existing user. An absent password keeps the
/// stored hash.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

fn not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

fn reject_blank(fields: &[(&str, &str)]) -> Result<(), AppError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(AppError::Validation(format!("{field} cannot be empty"))),
        None => Ok(()),
    }
}

/// POST /api/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    reject_blank(&[
        ("username", req.username.as_str()),
        ("email", req.email.as_str()),
        ("password", req.password.as_str()),
    ])?;

    let user = User {
        id: Some(Uuid::new_v4().to_string()),
        username: Some(req.username),
        email: Some(req.email),
        password: Some(req.password),
        roles: req.roles,
    };

    state.users.insert_user(&user).await?;
    info!("Created user {}", user.id.as_deref().unwrap_or_default());

    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.users.find_user(&id).await?.ok_or_else(not_found)?;
    Ok(Json(user.into()))
}

/// PUT /api/users/:id
///
/// Replaces username, email and roles. The id always comes from the path.
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    reject_blank(&[("username", req.username.as_str()), ("email", req.email.as_str())])?;
    if let Some(password) = &req.password {
        reject_blank(&[("password", password.as_str())])?;
    }

    let existing = state.users.find_user(&id).await?.ok_or_else(not_found)?;

    let user = User {
        id: existing.id,
        username: Some(req.username),
        email: Some(req.email),
        password: req.password.or(existing.password),
        roles: req.roles,
    };

    // Lost a race with a concurrent delete.
    if !state.users.replace_user(&user).await? {
        return Err(not_found());
    }
    info!("Updated user {id}");

    Ok(Json(user.into()))
}

/// DELETE /api/users/:id
///
/// Resumes owned by the user are left in place.
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.users.delete_user(&id).await? {
        return Err(not_found());
    }
    info!("Deleted user {id}");
    Ok(StatusCode::NO_CONTENT)
}
