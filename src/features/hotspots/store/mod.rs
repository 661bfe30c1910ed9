mod pg_store;

pub use pg_store::PgHotspotStore;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::hotspots::models::{Hotspot, HotspotAggregate, HotspotFilter, NewHotspot};

/// Access to the hotspot collection.
///
/// Services only see this trait; the concrete store is chosen at startup.
#[async_trait]
pub trait HotspotStore: Send + Sync {
    /// Records matching `filter`, newest `last_updated` first
    async fn find(&self, filter: &HotspotFilter) -> Result<Vec<Hotspot>>;

    async fn find_by_zone_id(&self, zone_id: &str) -> Result<Option<Hotspot>>;

    /// Grouped counts and raw means over every record
    async fn aggregate(&self) -> Result<HotspotAggregate>;

    /// Clears the collection and inserts `records` as one unit of work.
    /// Returns the number of records inserted.
    async fn replace_all(&self, records: &[NewHotspot]) -> Result<u64>;
}
