// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session manager: the single writer of shared session state.
//!
//! Maps the opaque identity issued by the auth provider to the locally-held
//! user profile, repairing missing profile documents with a synthesized
//! default. Shared state changes flow from exactly two sources: an
//! identity-change notification (see [`SessionManager::observe_auth_changes`])
//! or a completed explicit user action.

mod state;

pub use state::{SessionHandle, SessionSnapshot, SessionSubscription};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use validator::Validate;

use crate::db::ProfileStore;
use crate::error::{AuthError, ProfileWriteError, SessionError};
use crate::models::UserProfile;
use crate::services::identity::{Identity, IdentityProvider};
use state::{LoadingGuard, SharedState};

/// What to do with local state when provider sign-out fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutPolicy {
    /// Keep the profile so the user can retry (matches the mobile app).
    #[default]
    KeepProfile,
    /// Clear the profile even if the provider still considers the session
    /// active.
    ClearAlways,
}

/// Session behavior tunables.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub logout_policy: LogoutPolicy,
    /// Upper bound for each provider/store call made by an explicit session
    /// operation. `None` lets the transport decide.
    pub op_timeout: Option<Duration>,
}

/// Credential shape checked before hitting the provider. Mirrors the
/// provider's own rules so obvious mistakes fail fast with the same error
/// the provider would return.
#[derive(Debug, Validate)]
struct Credentials {
    #[validate(email)]
    email: String,
    #[validate(length(min = 6))]
    password: String,
}

fn credential_error(errors: &validator::ValidationErrors) -> AuthError {
    if errors.field_errors().contains_key("email") {
        AuthError::InvalidEmail
    } else {
        AuthError::WeakPassword
    }
}

fn write_timeout() -> ProfileWriteError {
    ProfileWriteError("Operation timed out".to_string())
}

struct Inner {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    shared: Arc<SharedState>,
    options: SessionOptions,
}

/// Owner of the shared session state.
///
/// There is exactly one writer: all mutations of the published profile go
/// through this type. Consumers get a read-only [`SessionHandle`].
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        options: SessionOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                identity,
                profiles,
                shared: SharedState::new(),
                options,
            }),
        }
    }

    /// Read-only view for the UI tree.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.inner.shared.clone())
    }

    /// Start consuming identity-change notifications.
    ///
    /// This is the sole entry point that mutates the shared profile outside
    /// of explicit user actions. The loop runs until the returned task is
    /// stopped or dropped; a stopped loop performs no further state writes.
    pub fn observe_auth_changes(&self) -> AuthStateTask {
        let inner = self.inner.clone();
        let mut watch = inner.identity.watch_identity();

        let handle = tokio::spawn(async move {
            loop {
                let identity = watch.current();
                inner.on_identity_change(identity).await;
                if watch.changed().await.is_err() {
                    // Provider dropped; nothing further can arrive.
                    break;
                }
            }
        });

        AuthStateTask { handle }
    }

    /// Verify credentials with the provider.
    ///
    /// The profile itself is loaded by the identity-change notification that
    /// follows a successful sign-in. The loading flag is set on entry and
    /// reset on every exit path.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _loading = LoadingGuard::engage(&self.inner.shared);

        self.inner
            .bounded(self.inner.identity.sign_in(email, password), || {
                AuthError::Timeout
            })
            .await?;
        Ok(())
    }

    /// Create an identity and its profile document.
    ///
    /// If the profile write fails the provider session is torn down again:
    /// the caller must never observe a signed-in state backed by half a
    /// signup.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(), SessionError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        credentials
            .validate()
            .map_err(|e| SessionError::Auth(credential_error(&e)))?;

        let _loading = LoadingGuard::engage(&self.inner.shared);

        let identity = self
            .inner
            .bounded(self.inner.identity.sign_up(email, password), || {
                AuthError::Timeout
            })
            .await
            .map_err(SessionError::Auth)?;

        let profile = UserProfile::new(identity.uid, email);

        if let Err(write_err) = self
            .inner
            .bounded(self.inner.profiles.set(&profile), write_timeout)
            .await
        {
            // Roll the half-created session back. The identity itself stays
            // with the provider, but the caller sees a clean signed-out
            // state.
            if let Err(out_err) = self.inner.identity.sign_out().await {
                tracing::error!(error = %out_err, "Sign-out after failed signup write failed");
            }
            self.inner.shared.publish(|s| s.profile = None);
            return Err(write_err.into());
        }

        self.inner.shared.publish(|s| s.profile = Some(profile));
        Ok(())
    }

    /// End the session with the provider and clear the local profile.
    ///
    /// On provider failure the local profile follows
    /// [`SessionOptions::logout_policy`].
    pub async fn logout(&self) -> Result<(), AuthError> {
        match self.inner.identity.sign_out().await {
            Ok(()) => {
                self.inner.shared.publish(|s| s.profile = None);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Provider sign-out failed");
                if self.inner.options.logout_policy == LogoutPolicy::ClearAlways {
                    self.inner.shared.publish(|s| s.profile = None);
                }
                Err(e)
            }
        }
    }

    /// Flip the premium entitlement.
    ///
    /// No-op without a loaded profile. The store write is a direct, merged
    /// mutation with no payment verification: a placeholder for a real
    /// billing integration, not a security boundary. The published profile
    /// is updated only after the write lands, so the UI can never show a
    /// premium state the store has not confirmed.
    pub async fn upgrade_to_premium(&self) -> Result<(), SessionError> {
        let Some(mut profile) = self.handle().profile() else {
            return Ok(());
        };
        profile.is_premium = true;

        self.inner
            .bounded(self.inner.profiles.set(&profile), write_timeout)
            .await
            .map_err(SessionError::ProfileWrite)?;

        self.inner.shared.publish(|s| s.profile = Some(profile));
        Ok(())
    }

    /// Replace the account password.
    ///
    /// Re-authentication happens inside the provider; no profile fields
    /// change.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let _loading = LoadingGuard::engage(&self.inner.shared);

        self.inner
            .bounded(self.inner.identity.update_password(current, new), || {
                AuthError::Timeout
            })
            .await
    }

    /// Send a password-reset email.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.inner
            .bounded(self.inner.identity.send_password_reset(email), || {
                AuthError::Timeout
            })
            .await
    }

    /// Attach a new profile photo URL (uploaded out-of-band by the UI).
    ///
    /// Same write-then-publish ordering as the upgrade flow.
    pub async fn update_photo_url(&self, url: String) -> Result<(), SessionError> {
        let Some(mut profile) = self.handle().profile() else {
            return Err(AuthError::NotSignedIn.into());
        };
        profile.photo_url = Some(url);

        self.inner
            .bounded(self.inner.profiles.set(&profile), write_timeout)
            .await
            .map_err(SessionError::ProfileWrite)?;

        self.inner.shared.publish(|s| s.profile = Some(profile));
        Ok(())
    }
}

impl Inner {
    async fn on_identity_change(&self, identity: Option<Identity>) {
        match identity {
            Some(identity) => self.resolve_profile(identity).await,
            None => self.shared.publish(|s| {
                s.profile = None;
                s.loading = false;
            }),
        }
    }

    /// Fetch the profile for an active identity, repairing a missing
    /// document with a synthesized default.
    async fn resolve_profile(&self, identity: Identity) {
        self.shared.publish(|s| s.loading = true);

        match self.profiles.get(&identity.uid).await {
            Ok(Some(profile)) => {
                self.shared.publish(|s| s.profile = Some(profile));
            }
            Ok(None) => {
                // Legacy or half-created account. Publish the synthesized
                // default before the repair write so the UI is not blocked
                // on it; the write itself is best-effort.
                let profile = UserProfile::new(identity.uid.clone(), identity.email.clone());
                self.shared.publish(|s| s.profile = Some(profile.clone()));

                if let Err(e) = self.profiles.set(&profile).await {
                    tracing::warn!(uid = %identity.uid, error = %e, "Profile repair write failed");
                }
            }
            Err(e) => {
                tracing::error!(uid = %identity.uid, error = %e, "Profile fetch failed");
            }
        }

        self.shared.publish(|s| s.loading = false);
    }

    /// Bound `fut` by the configured operation timeout.
    async fn bounded<T, E>(
        &self,
        fut: impl Future<Output = Result<T, E>>,
        on_timeout: impl FnOnce() -> E,
    ) -> Result<T, E> {
        match self.options.op_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => Err(on_timeout()),
            },
            None => fut.await,
        }
    }
}

/// Handle for the identity-observation loop.
///
/// Stopping (or dropping) it cancels the loop. Cancellation lands at the
/// loop's await points and state publication is synchronous, so a cancelled
/// loop can never write a torn snapshot.
pub struct AuthStateTask {
    handle: JoinHandle<()>,
}

impl AuthStateTask {
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for AuthStateTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
