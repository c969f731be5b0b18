//! User CRUD handlers.
//!
//! A missing user is not an error: get and update answer `200` with `null`,
//! delete answers with its fixed message either way.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::{
    dtos::{DeleteResponse, UserPayload, UserResponse},
    startup::AppState,
};

fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid user id '{}': {}", id, e)))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(payload) = payload?;

    let user = state.repository.create(payload.into_new_user()).await?;
    let response = UserResponse::from(user);

    tracing::info!(user_id = %response.id, "Created user");

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.repository.list().await?;
    tracing::debug!(count = users.len(), "Listed users");

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<UserResponse>>, AppError> {
    let id = parse_user_id(&id)?;

    let user = state.repository.get(id).await?;
    if user.is_none() {
        tracing::debug!(user_id = %id, "User not found");
    }

    Ok(Json(user.map(UserResponse::from)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<Option<UserResponse>>, AppError> {
    let id = parse_user_id(&id)?;
    let Json(payload) = payload?;

    let user = state.repository.update(id, payload.to_update()).await?;
    match &user {
        Some(_) => tracing::info!(user_id = %id, "Updated user"),
        None => tracing::debug!(user_id = %id, "User to update not found"),
    }

    Ok(Json(user.map(UserResponse::from)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_user_id(&id)?;

    let deleted = state.repository.delete(id).await?;
    tracing::debug!(user_id = %id, deleted, "Delete user");

    Ok(Json(DeleteResponse::deleted()))
}
