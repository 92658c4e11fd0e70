use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// The single entity exposed by the service. `id` is caller-supplied and
/// doubles as the document key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub name: String,
}

/// Store key for a character id: its decimal representation.
pub fn document_key(id: i64) -> String {
    id.to_string()
}

/// Human-readable `_id` of a raw document, for logs.
pub fn describe_key(document: &Document) -> String {
    match document.get("_id") {
        Some(bson::Bson::String(key)) => key.clone(),
        Some(other) => other.to_string(),
        None => "<missing _id>".to_string(),
    }
}

impl Character {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn key(&self) -> String {
        document_key(self.id)
    }

    /// Stored shape: `{ _id: "<id>", id: <id>, name: <name> }`.
    pub fn to_document(&self) -> Result<Document, AppError> {
        let mut document = bson::to_document(self).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!(
                "Failed to encode character {}: {}",
                self.id,
                e
            ))
        })?;
        document.insert("_id", self.key());
        Ok(document)
    }

    /// Decodes a stored document. `_id` and unknown fields are ignored.
    pub fn from_document(document: Document) -> Result<Self, AppError> {
        let key = describe_key(&document);
        bson::from_document(document).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!(
                "Failed to decode character document {}: {}",
                key,
                e
            ))
        })
    }
}

/// Decodes every document, skipping the ones that are not valid characters.
///
/// Each skipped document is reported as a warning with its key, so corrupted
/// data shows up in the logs without failing the whole listing.
pub fn decode_characters<I>(documents: I) -> Vec<Character>
where
    I: IntoIterator<Item = Document>,
{
    documents
        .into_iter()
        .filter_map(|document| {
            let key = describe_key(&document);
            match Character::from_document(document) {
                Ok(character) => Some(character),
                Err(e) => {
                    tracing::warn!(
                        document_key = %key,
                        error = %e,
                        "Skipping character document that failed to decode"
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_to_document_keys_by_id() {
        let document = Character::new(7, "Vegeta").to_document().unwrap();
        assert_eq!(document.get_str("_id").unwrap(), "7");
        assert_eq!(document.get_i64("id").unwrap(), 7);
        assert_eq!(document.get_str("name").unwrap(), "Vegeta");
    }

    #[test]
    fn test_from_document_ignores_key_and_extra_fields() {
        let document = doc! { "_id": "3", "id": 3_i32, "name": "Piccolo", "power": 9000 };
        let character = Character::from_document(document).unwrap();
        assert_eq!(character, Character::new(3, "Piccolo"));
    }

    #[test]
    fn test_from_document_rejects_wrong_types() {
        let document = doc! { "_id": "4", "id": "four", "name": "Krillin" };
        let err = Character::from_document(document).unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
        assert!(err.to_string().contains("document 4"));
    }

    #[test]
    fn test_decode_characters_skips_bad_documents() {
        let documents = vec![
            Character::new(1, "Goku").to_document().unwrap(),
            doc! { "_id": "2", "name": "no id" },
            Character::new(3, "Gohan").to_document().unwrap(),
        ];

        let characters = decode_characters(documents);
        assert_eq!(
            characters,
            vec![Character::new(1, "Goku"), Character::new(3, "Gohan")]
        );
    }

    #[test]
    fn test_describe_key_handles_non_string_ids() {
        assert_eq!(describe_key(&doc! { "_id": "9" }), "9");
        assert_eq!(describe_key(&doc! { "_id": 9 }), "9");
        assert_eq!(describe_key(&doc! {}), "<missing _id>");
    }
}
