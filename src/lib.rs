// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PestGuard core: session, entitlement and catalog logic for the
//! pest-control mobile app.
//!
//! This crate owns the state the UI tree renders from: the authenticated
//! session (profile + loading flag), the premium entitlement predicate, and
//! catalog access with built-in fallback data. Screens, navigation and
//! theming live in the embedding application.

pub mod config;
pub mod db;
pub mod entitlement;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use error::StoreConnectError;
use services::catalog::CatalogService;
use services::firebase_auth::FirebaseAuthClient;
use session::{SessionManager, SessionOptions};

/// Assembled application core.
pub struct AppCore {
    pub config: Config,
    pub session: SessionManager,
    pub catalog: CatalogService,
}

impl AppCore {
    /// Connect to the backends and assemble the core with default options.
    pub async fn connect(config: Config) -> Result<Self, StoreConnectError> {
        Self::connect_with_options(config, SessionOptions::default()).await
    }

    /// Connect to the backends and assemble the core.
    pub async fn connect_with_options(
        config: Config,
        options: SessionOptions,
    ) -> Result<Self, StoreConnectError> {
        let db = Arc::new(FirestoreDb::new(&config.gcp_project_id).await?);
        let auth = Arc::new(FirebaseAuthClient::new(config.firebase_api_key.clone()));

        let session = SessionManager::new(auth, db.clone(), options);
        let catalog = CatalogService::new(db);

        Ok(Self {
            config,
            session,
            catalog,
        })
    }
}
