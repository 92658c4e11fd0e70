use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use service_core::error::AppError;

/// Character id taken from the `:id` path segment.
///
/// Non-integer ids are rejected with 400 before any store call is made, as
/// are non-canonical spellings (`007`, `+7`) so that one character has exactly
/// one URL.
#[derive(Debug, Clone, Copy)]
pub struct CharacterId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CharacterId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

        let id = raw.parse::<i64>().map_err(|_| {
            tracing::warn!(raw_id = %raw, "Rejected non-integer character id");
            AppError::BadRequest(anyhow::anyhow!(
                "Character id must be an integer, got '{}'",
                raw
            ))
        })?;

        if id.to_string() != raw {
            tracing::warn!(raw_id = %raw, "Rejected non-canonical character id");
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Character id must be written as '{}', got '{}'",
                id,
                raw
            )));
        }

        Ok(CharacterId(id))
    }
}
