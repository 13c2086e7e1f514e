// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared session state: snapshot, read-only handle, subscriptions.
//!
//! Only the session manager can publish. Everything else receives a
//! [`SessionHandle`]: a read-only view plus observer registration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::models::UserProfile;

/// Point-in-time view of the session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Loaded profile, `None` when logged out
    pub profile: Option<UserProfile>,
    /// True while an auth operation or profile resolution is in flight
    pub loading: bool,
}

impl Default for SessionSnapshot {
    /// Before the first identity notification the session counts as loading,
    /// so the UI shows a splash instead of flashing the login screen.
    fn default() -> Self {
        Self {
            profile: None,
            loading: true,
        }
    }
}

type Observer = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

pub(crate) struct SharedState {
    snapshot: RwLock<SessionSnapshot>,
    observers: DashMap<u64, Observer>,
    next_observer: AtomicU64,
}

impl SharedState {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            snapshot: RwLock::new(SessionSnapshot::default()),
            observers: DashMap::new(),
            next_observer: AtomicU64::new(0),
        })
    }

    /// Apply `mutate` to the snapshot and notify every observer.
    pub(crate) fn publish(&self, mutate: impl FnOnce(&mut SessionSnapshot)) {
        let snapshot = {
            let mut guard = self.snapshot.write();
            mutate(&mut guard);
            guard.clone()
        };

        // Collected outside the map so an observer may (un)subscribe from
        // inside its callback.
        let observers: Vec<Observer> = self.observers.iter().map(|e| e.value().clone()).collect();
        for observer in observers {
            observer(&snapshot);
        }
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.read().clone()
    }
}

/// Read-only view of the session, safe to hand to any component.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<SharedState>,
}

impl SessionHandle {
    pub(crate) fn new(shared: Arc<SharedState>) -> Self {
        Self { shared }
    }

    /// Current profile, `None` when logged out.
    pub fn profile(&self) -> Option<UserProfile> {
        self.shared.snapshot.read().profile.clone()
    }

    /// True while a session operation is in flight.
    ///
    /// Callers must disable the triggering control while this is set: the
    /// core relies on at most one explicit session action running at a time.
    pub fn is_loading(&self) -> bool {
        self.shared.snapshot.read().loading
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.snapshot()
    }

    /// Register an observer, invoked with every published snapshot.
    ///
    /// The registration lasts until the returned subscription is dropped or
    /// explicitly unsubscribed; a torn-down observer is never invoked again.
    pub fn subscribe(
        &self,
        observer: impl Fn(&SessionSnapshot) + Send + Sync + 'static,
    ) -> SessionSubscription {
        let id = self.shared.next_observer.fetch_add(1, Ordering::Relaxed);
        self.shared.observers.insert(id, Arc::new(observer));
        SessionSubscription {
            id,
            shared: self.shared.clone(),
        }
    }
}

/// Observer registration handle. Unsubscribes on drop.
pub struct SessionSubscription {
    id: u64,
    shared: Arc<SharedState>,
}

impl SessionSubscription {
    /// Explicitly remove the observer; dropping the handle does the same.
    pub fn unsubscribe(self) {}
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.shared.observers.remove(&self.id);
    }
}

/// Scoped loading flag: set on construction, cleared on drop, so every exit
/// path of an operation resets it.
pub(crate) struct LoadingGuard {
    shared: Arc<SharedState>,
}

impl LoadingGuard {
    pub(crate) fn engage(shared: &Arc<SharedState>) -> Self {
        shared.publish(|s| s.loading = true);
        Self {
            shared: shared.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.shared.publish(|s| s.loading = false);
    }
}
