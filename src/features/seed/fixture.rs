use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::hotspots::models::{NewHotspot, RiskLevel, SourceType};

/// One record of the static hotspot fixture
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HotspotFixture {
    #[validate(length(min = 1, message = "zone_id must not be empty"))]
    pub zone_id: String,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = 0.0))]
    pub pm25: f64,

    #[validate(range(min = 0.0))]
    pub co2: f64,

    pub risk_level: RiskLevel,

    pub source_type: SourceType,

    #[serde(default)]
    pub preventive_measures: Vec<String>,

    /// Missing means "now"
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl HotspotFixture {
    pub fn into_new_hotspot(self, now: DateTime<Utc>) -> NewHotspot {
        NewHotspot {
            zone_id: self.zone_id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            pm25: self.pm25,
            co2: self.co2,
            risk_level: self.risk_level,
            source_type: self.source_type,
            preventive_measures: self.preventive_measures,
            last_updated: self.last_updated.unwrap_or(now),
        }
    }
}

/// Accepts RFC 3339 (`2025-01-05T12:30:00Z`) or a naive ISO-8601 datetime
/// (`2025-01-05T12:30:00.123456`), the latter read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", s))),
    }
}

fn ensure_not_blank(field: &str, value: &str, index: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Invalid fixture record #{}: {} must not be blank",
            index, field
        )));
    }
    Ok(())
}

/// Parses and validates a fixture document.
///
/// Fails on the first invalid record or duplicated `zone_id`, so a bad
/// fixture never reaches the store.
pub fn parse_fixture(json: &str) -> Result<Vec<HotspotFixture>> {
    let records: Vec<HotspotFixture> = serde_json::from_str(json)
        .map_err(|e| AppError::Validation(format!("Invalid fixture JSON: {}", e)))?;

    let mut seen = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|e| {
            AppError::Validation(format!(
                "Invalid fixture record #{} ({}): {}",
                index, record.zone_id, e
            ))
        })?;
        ensure_not_blank("zone_id", &record.zone_id, index)?;
        ensure_not_blank("name", &record.name, index)?;

        if !seen.insert(record.zone_id.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate zone_id '{}' in fixture",
                record.zone_id
            )));
        }
    }

    Ok(records)
}

pub async fn load_fixture(path: &Path) -> Result<Vec<HotspotFixture>> {
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Internal(format!("Failed to read fixture {}: {}", path.display(), e))
    })?;
    parse_fixture(&json)
}
