// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog content models.
//!
//! Catalog documents are author-managed and often sparse; missing fields map
//! to the same defaults the mobile clients apply. The document ID is taken
//! from the Firestore document name rather than a stored field.

use serde::{Deserialize, Serialize};

use crate::entitlement::GatedContent;

fn untitled() -> String {
    "Untitled".to_string()
}

fn untitled_service() -> String {
    "Untitled Service".to_string()
}

/// Pest-control guide (markdown body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    /// Firestore document ID
    #[serde(alias = "_firestore_id", default)]
    pub id: String,
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Premium-only content when set
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Chemical reference entry (HTML body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chemical {
    /// Firestore document ID
    #[serde(alias = "_firestore_id", default)]
    pub id: String,
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Premium-only content when set
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Service offering. Never entitlement-gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    /// Firestore document ID
    #[serde(alias = "_firestore_id", default)]
    pub id: String,
    #[serde(default = "untitled_service")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
}

impl GatedContent for Guide {
    fn is_paid(&self) -> bool {
        self.is_paid
    }
}

impl GatedContent for Chemical {
    fn is_paid(&self) -> bool {
        self.is_paid
    }
}
