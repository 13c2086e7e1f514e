// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: in-memory fakes for the provider and store ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use pestguard::db::{CatalogStore, ProfileStore};
use pestguard::error::{AuthError, CatalogFetchError, ProfileReadError, ProfileWriteError};
use pestguard::models::{Chemical, Guide, ServiceOffering, UserProfile};
use pestguard::services::identity::{Identity, IdentityProvider, IdentityWatch};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Poll until `cond` holds or the deadline passes.
#[allow(dead_code)]
pub async fn wait_until(cond: impl Fn() -> bool) {
    let mut waited = Duration::ZERO;
    while !cond() {
        assert!(
            waited < Duration::from_secs(5),
            "condition not met within 5s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
        waited += Duration::from_millis(5);
    }
}

/// In-memory identity provider with scriptable failures.
#[allow(dead_code)]
pub struct FakeIdentityProvider {
    tx: watch::Sender<Option<Identity>>,
    /// email -> (password, uid)
    accounts: Mutex<HashMap<String, (String, String)>>,
    next_uid: AtomicU64,
    pub fail_sign_out: AtomicBool,
    pub hang_sign_in: AtomicBool,
}

#[allow(dead_code)]
impl FakeIdentityProvider {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx,
            accounts: Mutex::new(HashMap::new()),
            next_uid: AtomicU64::new(1),
            fail_sign_out: AtomicBool::new(false),
            hang_sign_in: AtomicBool::new(false),
        }
    }

    /// Pre-register an account.
    pub fn with_account(self, email: &str, password: &str, uid: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), uid.to_string()));
        self
    }

    /// Drive an identity-change notification directly (e.g. a restored
    /// session at app start).
    pub fn emit(&self, identity: Option<Identity>) {
        self.tx.send_replace(identity);
    }

    /// Identity the provider currently considers active.
    pub fn active_identity(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if self.hang_sign_in.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        let uid = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some((stored, uid)) if stored == password => uid.clone(),
                _ => return Err(AuthError::InvalidCredentials),
            }
        };

        let identity = Identity {
            uid,
            email: email.to_string(),
        };
        self.tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let uid = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::EmailAlreadyInUse);
            }
            let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::SeqCst));
            accounts.insert(email.to_string(), (password.to_string(), uid.clone()));
            uid
        };

        let identity = Identity {
            uid,
            email: email.to_string(),
        };
        self.tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::SignOut("provider rejected sign-out".to_string()));
        }
        self.tx.send_replace(None);
        Ok(())
    }

    async fn update_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let identity = self.tx.borrow().clone().ok_or(AuthError::NotSignedIn)?;

        let mut accounts = self.accounts.lock().unwrap();
        let Some((stored, _uid)) = accounts.get_mut(&identity.email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if stored.as_str() != current {
            return Err(AuthError::InvalidCredentials);
        }
        *stored = new.to_string();
        Ok(())
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }

    fn watch_identity(&self) -> IdentityWatch {
        IdentityWatch::new(self.tx.subscribe())
    }
}

/// In-memory profile store with scriptable failures and a write counter.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeProfileStore {
    docs: Mutex<HashMap<String, UserProfile>>,
    pub write_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
}

#[allow(dead_code)]
impl FakeProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.docs
            .lock()
            .unwrap()
            .insert(profile.uid.clone(), profile);
        self
    }

    pub fn stored(&self, uid: &str) -> Option<UserProfile> {
        self.docs.lock().unwrap().get(uid).cloned()
    }
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, ProfileReadError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ProfileReadError("store unreachable".to_string()));
        }
        Ok(self.docs.lock().unwrap().get(uid).cloned())
    }

    async fn set(&self, profile: &UserProfile) -> Result<(), ProfileWriteError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProfileWriteError("permission denied".to_string()));
        }
        self.docs
            .lock()
            .unwrap()
            .insert(profile.uid.clone(), profile.clone());
        Ok(())
    }
}

/// Catalog store fixture modes.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum CatalogMode {
    Populated,
    Empty,
    Failing,
}

/// In-memory catalog store.
#[allow(dead_code)]
pub struct FakeCatalogStore {
    pub mode: CatalogMode,
}

#[async_trait]
impl CatalogStore for FakeCatalogStore {
    async fn list_guides(&self) -> Result<Vec<Guide>, CatalogFetchError> {
        match self.mode {
            CatalogMode::Populated => Ok(vec![Guide {
                id: "g-100".to_string(),
                title: "Wasp Nest Removal".to_string(),
                description: "Safe removal steps.".to_string(),
                is_paid: false,
                content: "Wait until dusk, then...".to_string(),
                image_url: None,
            }]),
            CatalogMode::Empty => Ok(vec![]),
            CatalogMode::Failing => Err(CatalogFetchError("store unreachable".to_string())),
        }
    }

    async fn list_chemicals(&self) -> Result<Vec<Chemical>, CatalogFetchError> {
        match self.mode {
            CatalogMode::Populated => Ok(vec![Chemical {
                id: "c-100".to_string(),
                title: "Fipronil".to_string(),
                description: "Broad-spectrum insecticide.".to_string(),
                is_paid: true,
                content: "<h1>Fipronil</h1>".to_string(),
                image_url: None,
            }]),
            CatalogMode::Empty => Ok(vec![]),
            CatalogMode::Failing => Err(CatalogFetchError("store unreachable".to_string())),
        }
    }

    async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogFetchError> {
        match self.mode {
            CatalogMode::Populated => Ok(vec![ServiceOffering {
                id: "s-100".to_string(),
                title: "Rodent Exclusion".to_string(),
                description: "Seal entry points around the home.".to_string(),
                content: "We inspect and seal...".to_string(),
                image_url: None,
                price_range: Some("$250+".to_string()),
            }]),
            CatalogMode::Empty => Ok(vec![]),
            CatalogMode::Failing => Err(CatalogFetchError("store unreachable".to_string())),
        }
    }
}
