use crate::models::Character;
use async_trait::async_trait;
use service_core::error::AppError;

/// Document-store operations behind the character routes.
///
/// Every call goes to the backing store; nothing is cached.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// All characters that decode cleanly. Undecodable documents are skipped
    /// with a warning.
    async fn list(&self) -> Result<Vec<Character>, AppError>;

    /// `Ok(None)` when no document exists for `id`.
    async fn get(&self, id: i64) -> Result<Option<Character>, AppError>;

    /// Creates or overwrites the document keyed by `character.id`.
    async fn upsert(&self, character: &Character) -> Result<(), AppError>;

    /// Removes the document keyed by `id`. Absence is not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;

    /// Releases the backing client. Called once, after the server has drained.
    async fn close(&self) {}
}
