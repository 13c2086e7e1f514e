//! Typed screen parameters.
//!
//! Each detail destination takes an explicit parameter struct instead of an
//! untyped navigation payload, so a screen cannot be pushed with the wrong
//! content type.

use crate::models::{Chemical, Guide, ServiceOffering};

/// Parameters for the guide detail screen.
#[derive(Debug, Clone)]
pub struct GuideDetailParams {
    pub guide: Guide,
}

/// Parameters for the chemical detail screen.
#[derive(Debug, Clone)]
pub struct ChemicalDetailParams {
    pub chemical: Chemical,
}

/// Parameters for the service detail screen.
#[derive(Debug, Clone)]
pub struct ServiceDetailParams {
    pub service: ServiceOffering,
}
