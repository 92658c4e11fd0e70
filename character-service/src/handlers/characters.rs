use crate::middleware::CharacterId;
use crate::models::Character;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Character>>, AppError> {
    let characters = state.store.list().await.map_err(|e| {
        tracing::error!("Failed to list characters: {}", e);
        e
    })?;

    tracing::debug!(count = characters.len(), "Listed characters");
    Ok(Json(characters))
}

/// 404 carries no body.
pub async fn get_character(
    State(state): State<AppState>,
    CharacterId(id): CharacterId,
) -> Result<Response, AppError> {
    let character = state.store.get(id).await.map_err(|e| {
        tracing::error!(character_id = id, "Failed to fetch character: {}", e);
        e
    })?;

    match character {
        Some(character) => Ok(Json(character).into_response()),
        None => {
            tracing::debug!(character_id = id, "Character not found");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}

/// Upserts by `id`. A body that does not parse as a character aborts with 400
/// and nothing is written.
pub async fn create_character(
    State(state): State<AppState>,
    payload: Result<Json<Character>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(character) = payload.map_err(|rejection| {
        tracing::warn!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "Rejected character payload"
        );
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    })?;

    state.store.upsert(&character).await.map_err(|e| {
        tracing::error!(character_id = character.id, "Failed to store character: {}", e);
        e
    })?;

    tracing::info!(character_id = character.id, "Character stored");
    Ok(StatusCode::OK)
}

pub async fn delete_character(
    State(state): State<AppState>,
    CharacterId(id): CharacterId,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await.map_err(|e| {
        tracing::error!(character_id = id, "Failed to delete character: {}", e);
        e
    })?;

    tracing::info!(character_id = id, "Character deleted");
    Ok(StatusCode::OK)
}
