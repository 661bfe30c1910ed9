use std::sync::Arc;

use crate::core::error::Result;
use crate::features::hotspots::models::HotspotAggregate;
use crate::features::hotspots::store::HotspotStore;
use crate::features::stats::dtos::{EmissionAverages, RiskLevelCounts, SourceTypeCounts, StatsDto};

/// Service for collection-wide statistics
pub struct StatsService {
    store: Arc<dyn HotspotStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn HotspotStore>) -> Self {
        Self { store }
    }

    /// Counts and mean readings over every hotspot, computed on each call
    pub async fn compute_stats(&self) -> Result<StatsDto> {
        let aggregate = self.store.aggregate().await?;
        Ok(StatsDto::from(aggregate))
    }
}

/// Rounds to two decimal places; a missing mean (empty collection) is zero
fn round_mean(mean: Option<f64>) -> f64 {
    match mean {
        Some(value) if value.is_finite() => (value * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

impl From<HotspotAggregate> for StatsDto {
    fn from(aggregate: HotspotAggregate) -> Self {
        Self {
            total_hotspots: aggregate.total,
            risk_levels: RiskLevelCounts {
                high: aggregate.high,
                medium: aggregate.medium,
                low: aggregate.low,
            },
            source_types: SourceTypeCounts {
                traffic: aggregate.traffic,
                industry: aggregate.industry,
                residential: aggregate.residential,
            },
            averages: EmissionAverages {
                pm25: round_mean(aggregate.avg_pm25),
                co2: round_mean(aggregate.avg_co2),
            },
        }
    }
}
