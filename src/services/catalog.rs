// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog access with static fallback data.
//!
//! Fetch failures and empty collections both fall back to the built-in
//! datasets so the app stays browsable offline and in demo environments.
//! Catalog errors are absorbed here and never surface to the user.

use std::sync::Arc;

use crate::db::CatalogStore;
use crate::models::{Chemical, Guide, ServiceOffering};

/// Read side of the content catalog.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All guides, in collection order.
    pub async fn guides(&self) -> Vec<Guide> {
        match self.store.list_guides().await {
            Ok(guides) if !guides.is_empty() => guides,
            Ok(_) => {
                tracing::debug!("No guides found in catalog, returning built-in data");
                fallback_guides()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Guide fetch failed, returning built-in data");
                fallback_guides()
            }
        }
    }

    /// All chemical entries, in collection order.
    pub async fn chemicals(&self) -> Vec<Chemical> {
        match self.store.list_chemicals().await {
            Ok(chemicals) if !chemicals.is_empty() => chemicals,
            Ok(_) => {
                tracing::debug!("No chemicals found in catalog, returning built-in data");
                fallback_chemicals()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chemical fetch failed, returning built-in data");
                fallback_chemicals()
            }
        }
    }

    /// All service offerings, in collection order.
    pub async fn services(&self) -> Vec<ServiceOffering> {
        match self.store.list_services().await {
            Ok(services) if !services.is_empty() => services,
            Ok(_) => {
                tracing::debug!("No services found in catalog, returning built-in data");
                fallback_services()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Service fetch failed, returning built-in data");
                fallback_services()
            }
        }
    }
}

/// Built-in guides, served when the collection is empty or unreachable.
pub fn fallback_guides() -> Vec<Guide> {
    vec![
        Guide {
            id: "1".to_string(),
            title: "How to get rid of Ants".to_string(),
            description: "Complete guide to removing ants from your kitchen.".to_string(),
            is_paid: false,
            content: "\
# Ant Removal Guide

Ants are a common nuisance. Here is how to deal with them:

1. **Identify the species**: Sugar ants vs Carpenter ants.
2. **Remove food sources**: Clean up crumbs.
3. **Seal entry points**: Caulk cracks.
4. **Use Baits**: Slow acting baits are best.
"
            .to_string(),
            image_url: None,
        },
        Guide {
            id: "2".to_string(),
            title: "Advanced Bed Bug Treatment".to_string(),
            description: "Professional grade steps for bed bugs. (Premium)".to_string(),
            is_paid: true,
            content: "\
# Bed Bug Protocol (Premium)

This is a premium guide for advanced users.

1. **Inspection**: check mattresses seams.
2. **Heat Treatment**: Wash clothes in hot water.
3. **Chemicals**: Use residuals (only if licensed).
4. **Follow up**: Re-inspect in 2 weeks.
"
            .to_string(),
            image_url: None,
        },
        Guide {
            id: "3".to_string(),
            title: "Rodent Control 101".to_string(),
            description: "Mouse vs Rat identification and trapping.".to_string(),
            is_paid: false,
            content: "Rodents can be tricky. Use snap traps effectively...".to_string(),
            image_url: None,
        },
        Guide {
            id: "4".to_string(),
            title: "Termite Prevention Secrets".to_string(),
            description: "Save your home foundation.".to_string(),
            is_paid: true,
            content: "Termites cause billions in damages. Here is the secret...".to_string(),
            image_url: None,
        },
    ]
}

/// Built-in chemical entries, served when the collection is empty or
/// unreachable.
pub fn fallback_chemicals() -> Vec<Chemical> {
    vec![
        Chemical {
            id: "1".to_string(),
            title: "Boric Acid".to_string(),
            description: "A common and effective insecticide.".to_string(),
            is_paid: false,
            content: "\
<h1>Boric Acid</h1>
<p>Boric acid is widely used for controlling cockroaches, ants, and other pests.</p>
<h2>How it works</h2>
<p>It acts as a stomach poison for insects and also damages their exoskeletons.</p>
<h2>Application</h2>
<ul>
    <li>Apply in cracks and crevices.</li>
    <li>Keep away from children and pets.</li>
</ul>
"
            .to_string(),
            image_url: None,
        },
        Chemical {
            id: "2".to_string(),
            title: "Diatomaceous Earth".to_string(),
            description: "Natural pest control for various insects.".to_string(),
            is_paid: false,
            content: "\
<h1>Diatomaceous Earth</h1>
<p>DE is made from fossilized remains of diatoms.</p>
<h2>Safety</h2>
<p>Use food-grade DE for household pest control.</p>
"
            .to_string(),
            image_url: None,
        },
        Chemical {
            id: "3".to_string(),
            title: "Imidacloprid (Professional)".to_string(),
            description: "Potent neurotoxin for severe infestations.".to_string(),
            is_paid: true,
            content: "\
<h1>Imidacloprid</h1>
<p>This is a systemic insecticide which acts as an insect neurotoxin.</p>
<p><strong>Warning:</strong> Use with extreme caution and follow label instructions strictly.</p>
"
            .to_string(),
            image_url: None,
        },
    ]
}

/// Built-in service offerings, served when the collection is empty or
/// unreachable.
pub fn fallback_services() -> Vec<ServiceOffering> {
    vec![
        ServiceOffering {
            id: "1".to_string(),
            title: "General Pest Inspection".to_string(),
            description: "Comprehensive home inspection for all common pests.".to_string(),
            content: "Our certified technicians will inspect your entire property...".to_string(),
            image_url: None,
            price_range: Some("$100 - $150".to_string()),
        },
        ServiceOffering {
            id: "2".to_string(),
            title: "Termite Treatment".to_string(),
            description: "Protect your home structural integrity.".to_string(),
            content: "We use the latest liquid defense systems...".to_string(),
            image_url: None,
            price_range: Some("Call for Quote".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chemicals_mark_professional_entry_paid() {
        let chemicals = fallback_chemicals();

        let titles: Vec<&str> = chemicals.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Boric Acid",
                "Diatomaceous Earth",
                "Imidacloprid (Professional)"
            ]
        );

        let paid: Vec<&str> = chemicals
            .iter()
            .filter(|c| c.is_paid)
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(paid, ["Imidacloprid (Professional)"]);
    }

    #[test]
    fn fallback_guides_contain_free_and_paid_entries() {
        let guides = fallback_guides();

        assert_eq!(guides.len(), 4);
        assert!(guides.iter().any(|g| !g.is_paid));

        let paid: Vec<&str> = guides
            .iter()
            .filter(|g| g.is_paid)
            .map(|g| g.title.as_str())
            .collect();
        assert_eq!(
            paid,
            ["Advanced Bed Bug Treatment", "Termite Prevention Secrets"]
        );
    }

    #[test]
    fn fallback_services_carry_price_ranges() {
        let services = fallback_services();

        assert_eq!(services.len(), 2);
        assert!(services.iter().all(|s| s.price_range.is_some()));
    }
}
