// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Catalog collections (guides, chemicals, services)

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::db::{collections, CatalogStore, ProfileStore};
use crate::error::{CatalogFetchError, ProfileReadError, ProfileWriteError, StoreConnectError};
use crate::models::{Chemical, Guide, ServiceOffering, UserProfile};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, StoreConnectError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| StoreConnectError(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, StoreConnectError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without
        // needing a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            StoreConnectError(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error message if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, String> {
        self.client
            .as_ref()
            .ok_or_else(|| "Database not connected (offline mode)".to_string())
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a user profile by identity uid.
    pub async fn get_user_profile(
        &self,
        uid: &str,
    ) -> Result<Option<UserProfile>, ProfileReadError> {
        self.get_client()
            .map_err(ProfileReadError)?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| ProfileReadError(e.to_string()))
    }

    /// Create or replace a user profile document.
    pub async fn upsert_user_profile(
        &self,
        profile: &UserProfile,
    ) -> Result<(), ProfileWriteError> {
        let _: () = self
            .get_client()
            .map_err(ProfileWriteError)?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(profile.uid.clone())
            .object(profile)
            .execute()
            .await
            .map_err(|e| ProfileWriteError(e.to_string()))?;
        Ok(())
    }

    // ─── Catalog Operations ──────────────────────────────────────

    /// List every document in a catalog collection.
    async fn list_collection<T>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, CatalogFetchError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.get_client()
            .map_err(CatalogFetchError)?
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await
            .map_err(|e| CatalogFetchError(e.to_string()))
    }
}

#[async_trait]
impl ProfileStore for FirestoreDb {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, ProfileReadError> {
        self.get_user_profile(uid).await
    }

    async fn set(&self, profile: &UserProfile) -> Result<(), ProfileWriteError> {
        self.upsert_user_profile(profile).await
    }
}

#[async_trait]
impl CatalogStore for FirestoreDb {
    async fn list_guides(&self) -> Result<Vec<Guide>, CatalogFetchError> {
        self.list_collection(collections::GUIDES).await
    }

    async fn list_chemicals(&self) -> Result<Vec<Chemical>, CatalogFetchError> {
        self.list_collection(collections::CHEMICALS).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogFetchError> {
        self.list_collection(collections::SERVICES).await
    }
}
