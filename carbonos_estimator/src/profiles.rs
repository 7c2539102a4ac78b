//! Static lookup tables for industry emission factors and export-region
//! carbon-tax exposure.
//!
//! Fallback for unknown codes lives here and nowhere else: an unrecognized
//! industry resolves to [`DEFAULT_EMISSION_FACTOR`], an unrecognized region to
//! [`DEFAULT_TAX_APPLICABILITY_RATE`].

use serde::{Deserialize, Serialize};

/// Emission factor (t CO₂e per 10,000 kWh) for industries missing from the table.
pub const DEFAULT_EMISSION_FACTOR: f64 = 5.0;

/// Tax applicability rate for regions missing from the table (no exposure).
pub const DEFAULT_TAX_APPLICABILITY_RATE: f64 = 0.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Manufacturing,
    Chemical,
    Steel,
    Textile,
    Electronics,
    Logistics,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportRegion {
    Eu,
    Uk,
    Japan,
    Us,
    #[serde(rename = "none")]
    Domestic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryProfile {
    pub industry: Industry,
    pub code: &'static str,
    pub label: &'static str,
    /// t CO₂e per 10,000 kWh consumed.
    pub emission_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRegionProfile {
    pub region: ExportRegion,
    pub code: &'static str,
    pub label: &'static str,
    /// Share of the reference carbon price applying to this destination, in [0,1].
    pub tax_applicability_rate: f64,
}

static INDUSTRY_PROFILES: [IndustryProfile; 6] = [
    IndustryProfile {
        industry: Industry::Manufacturing,
        code: "manufacturing",
        label: "General manufacturing",
        emission_factor: 5.2,
    },
    IndustryProfile {
        industry: Industry::Chemical,
        code: "chemical",
        label: "Chemicals",
        emission_factor: 8.1,
    },
    IndustryProfile {
        industry: Industry::Steel,
        code: "steel",
        label: "Steel and metals",
        emission_factor: 12.5,
    },
    IndustryProfile {
        industry: Industry::Textile,
        code: "textile",
        label: "Textiles and apparel",
        emission_factor: 4.6,
    },
    IndustryProfile {
        industry: Industry::Electronics,
        code: "electronics",
        label: "Electronics",
        emission_factor: 3.8,
    },
    IndustryProfile {
        industry: Industry::Logistics,
        code: "logistics",
        label: "Logistics and warehousing",
        emission_factor: 2.9,
    },
];

static EXPORT_REGION_PROFILES: [ExportRegionProfile; 5] = [
    ExportRegionProfile {
        region: ExportRegion::Eu,
        code: "eu",
        label: "European Union (CBAM)",
        tax_applicability_rate: 1.0,
    },
    ExportRegionProfile {
        region: ExportRegion::Uk,
        code: "uk",
        label: "United Kingdom",
        tax_applicability_rate: 0.8,
    },
    ExportRegionProfile {
        region: ExportRegion::Japan,
        code: "japan",
        label: "Japan",
        tax_applicability_rate: 0.3,
    },
    ExportRegionProfile {
        region: ExportRegion::Us,
        code: "us",
        label: "United States",
        tax_applicability_rate: 0.0,
    },
    ExportRegionProfile {
        region: ExportRegion::Domestic,
        code: "none",
        label: "Domestic only / no export",
        tax_applicability_rate: 0.0,
    },
];

fn normalize(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

impl Industry {
    pub fn profile(self) -> &'static IndustryProfile {
        // Table order matches declaration order.
        &INDUSTRY_PROFILES[self as usize]
    }
}

impl ExportRegion {
    pub fn profile(self) -> &'static ExportRegionProfile {
        &EXPORT_REGION_PROFILES[self as usize]
    }
}

impl IndustryProfile {
    /// All profiles in selector display order.
    pub fn all() -> &'static [IndustryProfile] {
        &INDUSTRY_PROFILES
    }

    pub fn lookup(code: &str) -> Option<&'static IndustryProfile> {
        let code = normalize(code);
        INDUSTRY_PROFILES.iter().find(|p| p.code == code)
    }
}

impl ExportRegionProfile {
    /// All profiles in selector display order.
    pub fn all() -> &'static [ExportRegionProfile] {
        &EXPORT_REGION_PROFILES
    }

    pub fn lookup(code: &str) -> Option<&'static ExportRegionProfile> {
        let code = normalize(code);
        EXPORT_REGION_PROFILES.iter().find(|p| p.code == code)
    }
}

/// Emission factor for `code`, or [`DEFAULT_EMISSION_FACTOR`] when unknown.
pub fn emission_factor_for(code: &str) -> f64 {
    IndustryProfile::lookup(code)
        .map(|p| p.emission_factor)
        .unwrap_or(DEFAULT_EMISSION_FACTOR)
}

/// Tax applicability rate for `code`, or [`DEFAULT_TAX_APPLICABILITY_RATE`] when unknown.
pub fn tax_rate_for(code: &str) -> f64 {
    ExportRegionProfile::lookup(code)
        .map(|p| p.tax_applicability_rate)
        .unwrap_or(DEFAULT_TAX_APPLICABILITY_RATE)
}
