// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Premium entitlement evaluation.
//!
//! The lock decision is a pure function of the content's paid flag and the
//! current profile. Every content detail screen applies the same predicate;
//! there is no per-screen variation.

use crate::models::UserProfile;

/// Content that may be restricted to premium subscribers.
pub trait GatedContent {
    fn is_paid(&self) -> bool;
}

/// True when `content` must show the paywall instead of its body.
///
/// Free content is never locked, regardless of profile state, including the
/// unauthenticated case where no profile is loaded at all.
pub fn is_locked(content: &impl GatedContent, profile: Option<&UserProfile>) -> bool {
    content.is_paid() && !profile.is_some_and(|p| p.is_premium)
}

/// Render state for a content detail screen.
///
/// `Locked` shows the paywall prompt with a call-to-action into the upgrade
/// flow; the content body is neither rendered nor fetched further. The only
/// transition is `Locked` → `Unlocked`, observed reactively when a
/// successful upgrade updates the shared profile. There is no downgrade
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentGate {
    Locked,
    Unlocked,
}

impl ContentGate {
    pub fn evaluate(content: &impl GatedContent, profile: Option<&UserProfile>) -> Self {
        if is_locked(content, profile) {
            Self::Locked
        } else {
            Self::Unlocked
        }
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}
