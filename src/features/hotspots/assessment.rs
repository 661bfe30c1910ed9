//! Threshold rules used to sanity-check fixture data.
//!
//! These are the mock rules the fixture generator applies when it produces
//! hotspot records; they are not an air-quality standard.

use crate::features::hotspots::models::{RiskLevel, SourceType};

const HIGH_PM25_MIN: f64 = 100.0;
const HIGH_CO2_MIN: f64 = 450.0;
const MEDIUM_PM25_MIN: f64 = 50.0;
const MEDIUM_CO2_MIN: f64 = 350.0;

const MAX_MEASURES: usize = 4;

/// Classifies a reading; either pollutant crossing a threshold is enough
pub fn classify(pm25: f64, co2: f64) -> RiskLevel {
    if pm25 >= HIGH_PM25_MIN || co2 >= HIGH_CO2_MIN {
        RiskLevel::High
    } else if pm25 >= MEDIUM_PM25_MIN || co2 >= MEDIUM_CO2_MIN {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Preventive measures for a zone, most specific first
pub fn recommended_measures(risk_level: RiskLevel, source_type: SourceType) -> Vec<String> {
    let high = risk_level == RiskLevel::High;

    let (base, escalated): (&[&str], &[&str]) = match source_type {
        SourceType::Traffic => (
            &[
                "Implement traffic flow optimization",
                "Promote public transportation",
            ],
            &[
                "Consider vehicle restrictions during peak hours",
                "Install air purifiers at traffic intersections",
            ],
        ),
        SourceType::Industry => (
            &[
                "Enforce emission control regulations",
                "Regular monitoring and compliance checks",
            ],
            &[
                "Temporary shutdown for maintenance",
                "Upgrade to cleaner production technologies",
            ],
        ),
        SourceType::Residential => (
            &[
                "Promote clean cooking fuels",
                "Awareness campaigns on waste management",
            ],
            &[
                "Install community air quality monitors",
                "Green space development initiatives",
            ],
        ),
    };

    let mut measures: Vec<&str> = base.to_vec();
    if high {
        measures.extend_from_slice(escalated);
    }
    measures.push("Plant trees and create green buffers");
    if high {
        measures.push("Issue health advisories for sensitive groups");
    }

    measures
        .into_iter()
        .take(MAX_MEASURES)
        .map(str::to_string)
        .collect()
}
