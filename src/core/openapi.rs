use utoipa::{Modify, OpenApi};

use crate::features::hotspots::{dtos as hotspots_dtos, handlers as hotspots_handlers, models};
use crate::features::stats::{dtos as stats_dtos, handlers as stats_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Hotspots
        hotspots_handlers::list_hotspots,
        hotspots_handlers::get_hotspot,
        // Stats
        stats_handlers::get_stats,
    ),
    components(
        schemas(
            // Hotspots
            models::RiskLevel,
            models::SourceType,
            hotspots_dtos::HotspotResponseDto,
            ApiResponse<Vec<hotspots_dtos::HotspotResponseDto>>,
            ApiResponse<hotspots_dtos::HotspotResponseDto>,
            // Stats
            stats_dtos::RiskLevelCounts,
            stats_dtos::SourceTypeCounts,
            stats_dtos::EmissionAverages,
            stats_dtos::StatsDto,
            ApiResponse<stats_dtos::StatsDto>,
        )
    ),
    tags(
        (name = "hotspots", description = "Carbon emission hotspots"),
        (name = "stats", description = "Aggregate hotspot statistics"),
    ),
    info(
        title = "CarbonLens API",
        version = "0.1.0",
        description = "Read-only API for carbon emission hotspots",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
