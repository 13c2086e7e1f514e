//! Storage layer: store contracts and the Firestore adapter.

pub mod firestore;

pub use firestore::FirestoreDb;

use async_trait::async_trait;

use crate::error::{CatalogFetchError, ProfileReadError, ProfileWriteError};
use crate::models::{Chemical, Guide, ServiceOffering, UserProfile};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const GUIDES: &str = "guides";
    pub const CHEMICALS: &str = "chemicals";
    pub const SERVICES: &str = "services";
}

/// Persistence contract for user profiles, keyed by identity uid.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile, `None` when no document exists for the uid.
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, ProfileReadError>;

    /// Create or replace the profile document for `profile.uid`.
    async fn set(&self, profile: &UserProfile) -> Result<(), ProfileWriteError>;
}

/// Read-only contract for the content catalog collections.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_guides(&self) -> Result<Vec<Guide>, CatalogFetchError>;
    async fn list_chemicals(&self) -> Result<Vec<Chemical>, CatalogFetchError>;
    async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogFetchError>;
}
