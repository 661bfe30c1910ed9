use chrono::Utc;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::hotspots::assessment;
use crate::features::hotspots::models::NewHotspot;
use crate::features::hotspots::store::HotspotStore;
use crate::features::seed::fixture::HotspotFixture;
use crate::features::stats::dtos::StatsDto;
use crate::features::stats::StatsService;

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// Fill empty `preventive_measures` with the rule-based recommendations
    pub fill_missing_measures: bool,
}

#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub inserted: u64,
    /// Zone ids whose declared risk level disagrees with their readings
    pub risk_mismatches: Vec<String>,
    pub stats: StatsDto,
}

/// Bulk-replaces the hotspot collection from fixture records
pub struct SeedService {
    store: Arc<dyn HotspotStore>,
}

impl SeedService {
    pub fn new(store: Arc<dyn HotspotStore>) -> Self {
        Self { store }
    }

    pub async fn seed(
        &self,
        fixtures: Vec<HotspotFixture>,
        options: SeedOptions,
    ) -> Result<SeedSummary> {
        let now = Utc::now();
        let mut risk_mismatches = Vec::new();

        let records: Vec<NewHotspot> = fixtures
            .into_iter()
            .map(|fixture| {
                let mut record = fixture.into_new_hotspot(now);

                let expected = assessment::classify(record.pm25, record.co2);
                if expected != record.risk_level {
                    tracing::warn!(
                        zone_id = %record.zone_id,
                        declared = %record.risk_level,
                        expected = %expected,
                        "Fixture risk level disagrees with readings"
                    );
                    risk_mismatches.push(record.zone_id.clone());
                }

                if options.fill_missing_measures && record.preventive_measures.is_empty() {
                    record.preventive_measures =
                        assessment::recommended_measures(record.risk_level, record.source_type);
                }

                record
            })
            .collect();

        let inserted = self.store.replace_all(&records).await?;
        tracing::info!("Inserted {} hotspots into database", inserted);

        let stats = StatsService::new(Arc::clone(&self.store))
            .compute_stats()
            .await?;

        Ok(SeedSummary {
            inserted,
            risk_mismatches,
            stats,
        })
    }
}
