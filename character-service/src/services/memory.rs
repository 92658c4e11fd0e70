use crate::models::{decode_characters, document_key, Character};
use crate::services::CharacterStore;
use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::Document;
use service_core::error::AppError;
use std::sync::Arc;

/// Process-local store holding raw documents keyed like the MongoDB backend.
///
/// Raw documents (including malformed ones) can be seeded with
/// [`InMemoryStore::insert_raw`], which keeps decode behavior identical to the
/// real store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<DashMap<String, Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: impl Into<String>, document: Document) {
        self.documents.insert(key.into(), document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl CharacterStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Character>, AppError> {
        let documents: Vec<Document> = self
            .documents
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Ok(decode_characters(documents))
    }

    async fn get(&self, id: i64) -> Result<Option<Character>, AppError> {
        let found = self
            .documents
            .get(&document_key(id))
            .map(|entry| entry.value().clone());
        found.map(Character::from_document).transpose()
    }

    async fn upsert(&self, character: &Character) -> Result<(), AppError> {
        let document = character.to_document()?;
        self.documents.insert(character.key(), document);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.documents.remove(&document_key(id));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
