use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hotspot counts per risk level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskLevelCounts {
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

/// Hotspot counts per source type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SourceTypeCounts {
    pub traffic: i64,
    pub industry: i64,
    pub residential: i64,
}

/// Mean readings, rounded to two decimals; zero for an empty collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmissionAverages {
    pub pm25: f64,
    pub co2: f64,
}

/// Summary shown in the dashboard stats panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_hotspots: i64,
    pub risk_levels: RiskLevelCounts,
    pub source_types: SourceTypeCounts,
    pub averages: EmissionAverages,
}
