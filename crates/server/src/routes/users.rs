use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use service::user::domain::{User, UserDraft};
use service::user::repo::seaorm::SeaOrmUserRepository;
use service::user::UserService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<UserService<SeaOrmUserRepository>>,
}

pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<ServerState>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<User>, ApiError> {
    let created = state.users.create_user(draft).await?;
    Ok(Json(created))
}

pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get_user(id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<UserDraft>,
) -> Result<Json<User>, ApiError> {
    let updated = state.users.update_user(id, patch).await?;
    Ok(Json(updated))
}

/// Both outcomes render as a plain-text message with HTTP success framing.
pub async fn delete_user(State(state): State<ServerState>, Path(id): Path<i64>) -> String {
    if state.users.delete_user(id).await {
        format!("User with ID {} was deleted", id)
    } else {
        format!("User with ID {} was not found", id)
    }
}
