use crate::config::MongoConfig;
use crate::models::{decode_characters, document_key, Character};
use crate::services::metrics::observe_store_operation;
use crate::services::CharacterStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{AuthMechanism, ClientOptions, Credential, ReplaceOptions, Tls, TlsOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::path::PathBuf;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    pub async fn connect(config: &MongoConfig, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("character-service".to_string());

        if let Some(path) = &config.credentials_file {
            tracing::info!(credentials_file = %path, "Using X.509 client certificate");
            let tls = TlsOptions::builder()
                .cert_key_file_path(PathBuf::from(path))
                .build();
            options.tls = Some(Tls::Enabled(tls));
            options.credential = Some(
                Credential::builder()
                    .mechanism(AuthMechanism::MongoDbX509)
                    .build(),
            );
        }

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);

        let store = Self {
            client,
            db,
            collection: collection.to_string(),
        };

        // The driver connects lazily; ping so bad credentials fail at startup.
        store.ping().await?;

        tracing::info!(
            database = %config.database,
            collection = %collection,
            "Successfully connected to MongoDB database"
        );
        Ok(store)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn characters(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl CharacterStore for MongoDb {
    async fn list(&self) -> Result<Vec<Character>, AppError> {
        let result = async {
            let cursor = self.characters().find(None, None).await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            Ok::<_, AppError>(decode_characters(documents))
        }
        .await;

        observe_store_operation("list", &result);
        result
    }

    async fn get(&self, id: i64) -> Result<Option<Character>, AppError> {
        let result = async {
            let found = self
                .characters()
                .find_one(doc! { "_id": document_key(id) }, None)
                .await?;
            found.map(Character::from_document).transpose()
        }
        .await;

        observe_store_operation("get", &result);
        result
    }

    async fn upsert(&self, character: &Character) -> Result<(), AppError> {
        let result = async {
            let document = character.to_document()?;
            let options = ReplaceOptions::builder().upsert(true).build();
            self.characters()
                .replace_one(doc! { "_id": character.key() }, document, options)
                .await?;
            Ok::<_, AppError>(())
        }
        .await;

        observe_store_operation("upsert", &result);
        result
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = async {
            self.characters()
                .delete_one(doc! { "_id": document_key(id) }, None)
                .await?;
            Ok::<_, AppError>(())
        }
        .await;

        observe_store_operation("delete", &result);
        result
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ping().await
    }

    async fn close(&self) {
        tracing::info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
