// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Identity Toolkit (Firebase Auth) REST client.
//!
//! Covers the slice of the API the app uses:
//! - Email/password sign-in and sign-up
//! - Password update with re-authentication
//! - Password-reset emails
//!
//! Points at the local Auth emulator when FIREBASE_AUTH_EMULATOR_HOST is set.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tokio::sync::watch;

use crate::error::AuthError;
use crate::services::identity::{Identity, IdentityProvider, IdentityWatch};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Firebase Auth client.
pub struct FirebaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Active provider session, `None` when signed out.
    session: RwLock<Option<AuthSession>>,
    identity_tx: watch::Sender<Option<Identity>>,
}

#[derive(Debug, Clone)]
struct AuthSession {
    identity: Identity,
    id_token: String,
}

impl FirebaseAuthClient {
    /// Create a client for the given project API key.
    ///
    /// For local development with the Auth emulator, set
    /// FIREBASE_AUTH_EMULATOR_HOST.
    pub fn new(api_key: String) -> Self {
        let base_url = match std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => {
                tracing::info!(host = %host, "Using Firebase Auth emulator");
                format!("http://{}/identitytoolkit.googleapis.com/v1", host)
            }
            Err(_) => IDENTITY_TOOLKIT_URL.to_string(),
        };

        let (identity_tx, _) = watch::channel(None);

        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            session: RwLock::new(None),
            identity_tx,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, action, self.api_key)
    }

    /// POST an email/password pair to a token-returning endpoint.
    async fn post_credentials(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, AuthError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .http
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        check_response_json(response).await
    }

    /// Store the new session and notify identity watchers.
    fn activate(&self, token: TokenResponse) -> Identity {
        let identity = Identity {
            uid: token.local_id,
            email: token.email,
        };

        *self.session.write() = Some(AuthSession {
            identity: identity.clone(),
            id_token: token.id_token,
        });
        self.identity_tx.send_replace(Some(identity.clone()));

        identity
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let token = self
            .post_credentials("signInWithPassword", email, password)
            .await?;
        Ok(self.activate(token))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let token = self.post_credentials("signUp", email, password).await?;
        Ok(self.activate(token))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // The REST API has no sign-out call: the session ends when the
        // tokens are discarded.
        *self.session.write() = None;
        self.identity_tx.send_replace(None);
        Ok(())
    }

    async fn update_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let email = self
            .session
            .read()
            .as_ref()
            .map(|s| s.identity.email.clone())
            .ok_or(AuthError::NotSignedIn)?;

        // Re-authenticate first so a stale session cannot change the
        // credential without knowing the current password.
        let token = self
            .post_credentials("signInWithPassword", &email, current)
            .await?;

        let body = serde_json::json!({
            "idToken": token.id_token,
            "password": new,
            "returnSecureToken": true,
        });

        let response = self
            .http
            .post(self.endpoint("update"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let refreshed: TokenResponse = check_response_json(response).await?;

        // The update invalidates the old token; keep the session current.
        if let Some(session) = self.session.write().as_mut() {
            session.id_token = refreshed.id_token;
        }

        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let body = serde_json::json!({
            "requestType": "PASSWORD_RESET",
            "email": email,
        });

        let response = self
            .http
            .post(self.endpoint("sendOobCode"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        check_response(response).await
    }

    fn watch_identity(&self) -> IdentityWatch {
        IdentityWatch::new(self.identity_tx.subscribe())
    }
}

/// Token-bearing response from sign-in, sign-up and update calls.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
}

/// Identity Toolkit error payload: `{"error": {"message": "EMAIL_EXISTS"}}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Check response status, mapping Identity Toolkit error codes.
async fn check_response(response: reqwest::Response) -> Result<(), AuthError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(response).await)
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AuthError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| AuthError::Provider(format!("JSON parse error: {}", e)))
}

async fn error_from_response(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => AuthError::from_provider_code(&parsed.error.message),
        Err(_) => AuthError::Provider(format!("HTTP {}: {}", status, body)),
    }
}
