use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Risk level enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "hotspot_risk_level")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Exact, case-sensitive match on the stored literal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown risk level '{}'", s))
    }
}

/// Source type enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "hotspot_source_type")]
pub enum SourceType {
    Traffic,
    Industry,
    Residential,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [
        SourceType::Traffic,
        SourceType::Industry,
        SourceType::Residential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Traffic => "Traffic",
            SourceType::Industry => "Industry",
            SourceType::Residential => "Residential",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| format!("unknown source type '{}'", s))
    }
}

/// Database model for an emission hotspot
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Hotspot {
    pub id: Uuid,
    pub zone_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pm25: f64,
    pub co2: f64,
    pub risk_level: RiskLevel,
    pub source_type: SourceType,
    pub preventive_measures: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a hotspot; the store assigns `id` and audit timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewHotspot {
    pub zone_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pm25: f64,
    pub co2: f64,
    pub risk_level: RiskLevel,
    pub source_type: SourceType,
    pub preventive_measures: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Already-validated list filter. `None` means "do not filter on this field".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotspotFilter {
    pub risk_level: Option<RiskLevel>,
    pub source_type: Option<SourceType>,
}

/// Raw grouped counts and means over the whole collection.
///
/// Means are `None` when the collection is empty.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct HotspotAggregate {
    pub total: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
    pub traffic: i64,
    pub industry: i64,
    pub residential: i64,
    pub avg_pm25: Option<f64>,
    pub avg_co2: Option<f64>,
}
