use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::hotspots::models::{Hotspot, HotspotAggregate, HotspotFilter, NewHotspot};
use crate::features::hotspots::store::HotspotStore;

/// PostgreSQL-backed hotspot store
pub struct PgHotspotStore {
    pool: PgPool,
}

impl PgHotspotStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotspotStore for PgHotspotStore {
    async fn find(&self, filter: &HotspotFilter) -> Result<Vec<Hotspot>> {
        // NULL parameters disable the corresponding predicate
        let hotspots: Vec<Hotspot> = sqlx::query_as(
            r#"
            SELECT id, zone_id, name, latitude, longitude, pm25, co2,
                   risk_level, source_type, preventive_measures,
                   last_updated, created_at, updated_at
            FROM hotspots
            WHERE ($1::hotspot_risk_level IS NULL OR risk_level = $1)
              AND ($2::hotspot_source_type IS NULL OR source_type = $2)
            ORDER BY last_updated DESC
            "#,
        )
        .bind(filter.risk_level)
        .bind(filter.source_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch hotspots: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(hotspots)
    }

    async fn find_by_zone_id(&self, zone_id: &str) -> Result<Option<Hotspot>> {
        let hotspot: Option<Hotspot> = sqlx::query_as(
            r#"
            SELECT id, zone_id, name, latitude, longitude, pm25, co2,
                   risk_level, source_type, preventive_measures,
                   last_updated, created_at, updated_at
            FROM hotspots
            WHERE zone_id = $1
            "#,
        )
        .bind(zone_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch hotspot by zone_id {}: {:?}", zone_id, e);
            AppError::Database(e)
        })?;

        Ok(hotspot)
    }

    async fn aggregate(&self) -> Result<HotspotAggregate> {
        let aggregate: HotspotAggregate = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE risk_level = 'High') AS high,
                COUNT(*) FILTER (WHERE risk_level = 'Medium') AS medium,
                COUNT(*) FILTER (WHERE risk_level = 'Low') AS low,
                COUNT(*) FILTER (WHERE source_type = 'Traffic') AS traffic,
                COUNT(*) FILTER (WHERE source_type = 'Industry') AS industry,
                COUNT(*) FILTER (WHERE source_type = 'Residential') AS residential,
                AVG(pm25) AS avg_pm25,
                AVG(co2) AS avg_co2
            FROM hotspots
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to aggregate hotspots: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(aggregate)
    }

    async fn replace_all(&self, records: &[NewHotspot]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM hotspots")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!("Cleared {} existing hotspots", deleted);

        let mut inserted = 0;
        for record in records {
            inserted += sqlx::query(
                r#"
                INSERT INTO hotspots (
                    zone_id, name, latitude, longitude, pm25, co2,
                    risk_level, source_type, preventive_measures, last_updated
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(&record.zone_id)
            .bind(&record.name)
            .bind(record.latitude)
            .bind(record.longitude)
            .bind(record.pm25)
            .bind(record.co2)
            .bind(record.risk_level)
            .bind(record.source_type)
            .bind(&record.preventive_measures)
            .bind(record.last_updated)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert hotspot {}: {:?}", record.zone_id, e);
                AppError::Database(e)
            })?
            .rows_affected();
        }

        tx.commit().await?;

        Ok(inserted)
    }
}
