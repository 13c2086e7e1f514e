// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headless smoke harness for the PestGuard core.
//!
//! Wires the real backends (or their emulators) and runs one full pass:
//! observe auth state, sign in with DEMO_EMAIL / DEMO_PASSWORD when set,
//! then list the catalog with entitlement decisions. Useful for exercising
//! the core without a UI.

use std::time::Duration;

use pestguard::{config::Config, entitlement::is_locked, AppCore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(project = %config.gcp_project_id, "Starting PestGuard core harness");

    let core = AppCore::connect(config).await?;
    let handle = core.session.handle();

    // Keep the observer task alive for the whole run
    let _auth_task = core.session.observe_auth_changes();

    if let (Ok(email), Ok(password)) =
        (std::env::var("DEMO_EMAIL"), std::env::var("DEMO_PASSWORD"))
    {
        tracing::info!(email = %email, "Signing in demo user");
        core.session.login(&email, &password).await?;

        // Profile resolution runs on the auth-change notification; give it
        // a bounded window to land.
        let mut waited = Duration::ZERO;
        while handle.profile().is_none() && waited < Duration::from_secs(10) {
            tokio::time::sleep(Duration::from_millis(50)).await;
            waited += Duration::from_millis(50);
        }

        match handle.profile() {
            Some(profile) => tracing::info!(
                uid = %profile.uid,
                premium = profile.is_premium,
                "Profile resolved"
            ),
            None => tracing::warn!("Profile did not resolve within 10s"),
        }
    } else {
        tracing::info!("DEMO_EMAIL/DEMO_PASSWORD not set, browsing anonymously");
    }

    let profile = handle.profile();

    for guide in core.catalog.guides().await {
        let locked = is_locked(&guide, profile.as_ref());
        tracing::info!(title = %guide.title, paid = guide.is_paid, locked, "Guide");
    }

    for chemical in core.catalog.chemicals().await {
        let locked = is_locked(&chemical, profile.as_ref());
        tracing::info!(title = %chemical.title, paid = chemical.is_paid, locked, "Chemical");
    }

    for service in core.catalog.services().await {
        tracing::info!(
            title = %service.title,
            price = service.price_range.as_deref().unwrap_or("-"),
            "Service"
        );
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pestguard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
