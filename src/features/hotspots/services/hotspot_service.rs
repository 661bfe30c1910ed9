use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::hotspots::models::{Hotspot, HotspotFilter};
use crate::features::hotspots::store::HotspotStore;
use crate::shared::constants::HOTSPOT_NOT_FOUND;

/// Read-only queries over the hotspot collection
pub struct HotspotService {
    store: Arc<dyn HotspotStore>,
}

impl HotspotService {
    pub fn new(store: Arc<dyn HotspotStore>) -> Self {
        Self { store }
    }

    /// List hotspots matching `filter`, newest first
    pub async fn list_hotspots(&self, filter: &HotspotFilter) -> Result<Vec<Hotspot>> {
        let hotspots = self.store.find(filter).await?;
        tracing::debug!(
            risk_level = ?filter.risk_level,
            source_type = ?filter.source_type,
            count = hotspots.len(),
            "Listed hotspots"
        );
        Ok(hotspots)
    }

    /// Get a hotspot by its zone id
    pub async fn get_hotspot_by_id(&self, zone_id: &str) -> Result<Hotspot> {
        self.store
            .find_by_zone_id(zone_id)
            .await?
            .ok_or_else(|| AppError::NotFound(HOTSPOT_NOT_FOUND.to_string()))
    }
}
