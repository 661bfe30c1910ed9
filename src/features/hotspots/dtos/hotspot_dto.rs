use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::hotspots::models::{Hotspot, HotspotFilter, RiskLevel, SourceType};

/// Query parameters for listing hotspots.
///
/// Values are kept as raw strings: anything that is not an exact enum
/// literal is dropped instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct HotspotQueryParams {
    /// Filter by risk level (Low, Medium, High)
    #[param(example = "High")]
    pub risk_level: Option<String>,

    /// Filter by source type (Traffic, Industry, Residential)
    #[param(example = "Traffic")]
    pub source_type: Option<String>,
}

impl HotspotQueryParams {
    /// Builds params from raw query pairs. The first occurrence of a key
    /// wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "risk_level" => &mut params.risk_level,
                "source_type" => &mut params.source_type,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    pub fn to_filter(&self) -> HotspotFilter {
        HotspotFilter {
            risk_level: self.risk_level.as_deref().and_then(|s| s.parse().ok()),
            source_type: self.source_type.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

/// Wire representation of a hotspot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HotspotResponseDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[schema(example = "BH-001")]
    pub zone_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Particulate matter 2.5 (µg/m³)
    pub pm25: f64,
    /// Carbon dioxide (ppm)
    pub co2: f64,
    pub risk_level: RiskLevel,
    pub source_type: SourceType,
    pub preventive_measures: Vec<String>,
    #[schema(example = "2025-01-05T12:30:00.000Z")]
    pub last_updated: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2025-01-05T12:30:00.000Z`
pub fn to_iso_string(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<Hotspot> for HotspotResponseDto {
    fn from(hotspot: Hotspot) -> Self {
        Self {
            id: hotspot.id.to_string(),
            zone_id: hotspot.zone_id,
            name: hotspot.name,
            latitude: hotspot.latitude,
            longitude: hotspot.longitude,
            pm25: hotspot.pm25,
            co2: hotspot.co2,
            risk_level: hotspot.risk_level,
            source_type: hotspot.source_type,
            preventive_measures: hotspot.preventive_measures,
            last_updated: to_iso_string(&hotspot.last_updated),
            created_at: to_iso_string(&hotspot.created_at),
            updated_at: to_iso_string(&hotspot.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn sample() -> Hotspot {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 12, 30, 0).unwrap();
        Hotspot {
            id: Uuid::nil(),
            zone_id: "BH-001".to_string(),
            name: "Acharya Vihar".to_string(),
            latitude: 20.2961,
            longitude: 85.8245,
            pm25: 112.4,
            co2: 478.2,
            risk_level: RiskLevel::High,
            source_type: SourceType::Traffic,
            preventive_measures: vec!["b".to_string(), "a".to_string()],
            last_updated: ts,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_wire_format_stringifies_id_and_timestamps() {
        let body = serde_json::to_value(HotspotResponseDto::from(sample())).unwrap();

        assert_eq!(body["_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(body["last_updated"], "2025-01-05T12:30:00.000Z");
        assert_eq!(body["createdAt"], "2025-01-05T12:30:00.000Z");
        assert_eq!(body["updatedAt"], "2025-01-05T12:30:00.000Z");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_wire_format_passes_other_fields_through() {
        let body = serde_json::to_value(HotspotResponseDto::from(sample())).unwrap();

        assert_eq!(body["zone_id"], "BH-001");
        assert_eq!(body["pm25"], 112.4);
        assert_eq!(body["risk_level"], "High");
        assert_eq!(body["source_type"], "Traffic");
        assert_eq!(body["preventive_measures"], serde_json::json!(["b", "a"]));
    }

    #[test]
    fn test_query_params_drop_unknown_values() {
        let params = HotspotQueryParams {
            risk_level: Some("Extreme".to_string()),
            source_type: Some("Industry".to_string()),
        };
        assert_eq!(
            params.to_filter(),
            HotspotFilter {
                risk_level: None,
                source_type: Some(SourceType::Industry),
            }
        );

        assert_eq!(HotspotQueryParams::default().to_filter(), HotspotFilter::default());
    }

    #[test]
    fn test_from_pairs_keeps_first_occurrence() {
        let pairs = vec![
            ("page".to_string(), "2".to_string()),
            ("risk_level".to_string(), "High".to_string()),
            ("risk_level".to_string(), "Low".to_string()),
            ("source_type".to_string(), "Traffic".to_string()),
        ];

        let params = HotspotQueryParams::from_pairs(pairs);
        assert_eq!(params.risk_level.as_deref(), Some("High"));
        assert_eq!(params.source_type.as_deref(), Some("Traffic"));
    }
}
