// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - provider clients and catalog access.

pub mod catalog;
pub mod firebase_auth;
pub mod identity;

pub use catalog::CatalogService;
pub use firebase_auth::FirebaseAuthClient;
pub use identity::{Identity, IdentityProvider, IdentityWatch};
