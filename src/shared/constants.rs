/// Fixture loaded by `seed` when no path is given
pub const DEFAULT_FIXTURE_PATH: &str = "data/mock_hotspots.json";

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const HOTSPOT_NOT_FOUND: &str = "Hotspot not found";

pub const FAILED_TO_FETCH_HOTSPOTS: &str = "Failed to fetch hotspots";

pub const FAILED_TO_FETCH_HOTSPOT: &str = "Failed to fetch hotspot";

pub const FAILED_TO_FETCH_STATS: &str = "Failed to fetch stats";
