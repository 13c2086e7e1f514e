// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore emulator integration tests.
//!
//! Run with FIRESTORE_EMULATOR_HOST pointing at a local emulator; each test
//! skips itself when the emulator is absent. The offline-mock tests run
//! everywhere.

mod common;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use common::{wait_until, FakeIdentityProvider};
use pestguard::db::{CatalogStore, FirestoreDb, ProfileStore};
use pestguard::models::UserProfile;
use pestguard::services::identity::Identity;
use pestguard::session::{SessionManager, SessionOptions};

/// Unique-enough uid so reruns against a shared emulator don't collide.
fn test_uid(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

#[tokio::test]
async fn profile_roundtrip() {
    require_emulator!();

    let db = FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator");

    let profile = UserProfile {
        uid: test_uid("it-roundtrip"),
        email: "it@example.com".to_string(),
        is_premium: true,
        photo_url: Some("https://example.com/p.png".to_string()),
    };

    db.set(&profile).await.unwrap();
    let loaded = db.get(&profile.uid).await.unwrap();
    assert_eq!(loaded, Some(profile));
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
    require_emulator!();

    let db = FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator");

    let loaded = db.get(&test_uid("it-missing")).await.unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn repair_path_persists_against_emulator() {
    require_emulator!();

    let db = Arc::new(
        FirestoreDb::new("test-project")
            .await
            .expect("Failed to connect to Firestore emulator"),
    );
    let identity = Arc::new(FakeIdentityProvider::new());

    let session = SessionManager::new(identity.clone(), db.clone(), SessionOptions::default());
    let handle = session.handle();
    let _task = session.observe_auth_changes();

    let uid = test_uid("it-legacy");
    identity.emit(Some(Identity {
        uid: uid.clone(),
        email: "legacy@example.com".to_string(),
    }));

    wait_until(|| handle.profile().is_some()).await;
    assert_eq!(
        handle.profile(),
        Some(UserProfile::new(uid.clone(), "legacy@example.com"))
    );

    // The repair write is best-effort and runs after publication; poll the
    // store until it lands.
    let mut stored = None;
    for _ in 0..100 {
        stored = db.get_user_profile(&uid).await.unwrap();
        if stored.is_some() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(stored, Some(UserProfile::new(uid, "legacy@example.com")));
}

#[tokio::test]
async fn offline_mock_errors_on_every_operation() {
    let db = FirestoreDb::new_mock();

    assert!(db.get("any-uid").await.is_err());
    assert!(db.set(&UserProfile::new("any-uid", "a@b.com")).await.is_err());
    assert!(db.list_guides().await.is_err());
    assert!(db.list_chemicals().await.is_err());
    assert!(db.list_services().await.is_err());
}
