use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::hotspots::dtos::{HotspotQueryParams, HotspotResponseDto};
use crate::features::hotspots::services::HotspotService;
use crate::shared::constants::{FAILED_TO_FETCH_HOTSPOT, FAILED_TO_FETCH_HOTSPOTS};
use crate::shared::types::ApiResponse;

/// List emission hotspots
#[utoipa::path(
    get,
    path = "/api/hotspots",
    params(HotspotQueryParams),
    responses(
        (status = 200, description = "Hotspots sorted by last update, newest first", body = ApiResponse<Vec<HotspotResponseDto>>),
        (status = 500, description = "Store failure")
    ),
    tag = "hotspots"
)]
pub async fn list_hotspots(
    State(service): State<Arc<HotspotService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<Vec<HotspotResponseDto>>>> {
    // Raw pairs so repeated or malformed keys never reject the request
    let query = HotspotQueryParams::from_pairs(pairs);
    let hotspots = service
        .list_hotspots(&query.to_filter())
        .await
        .map_err(|e| e.or_message(FAILED_TO_FETCH_HOTSPOTS))?;
    let dtos: Vec<HotspotResponseDto> = hotspots.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::collection(dtos)))
}

/// Get a hotspot by zone id
#[utoipa::path(
    get,
    path = "/api/hotspots/{id}",
    params(
        ("id" = String, Path, description = "Zone id, e.g. BH-001")
    ),
    responses(
        (status = 200, description = "Hotspot details", body = ApiResponse<HotspotResponseDto>),
        (status = 404, description = "Hotspot not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "hotspots"
)]
pub async fn get_hotspot(
    State(service): State<Arc<HotspotService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HotspotResponseDto>>> {
    let hotspot = service
        .get_hotspot_by_id(&id)
        .await
        .map_err(|e| e.or_message(FAILED_TO_FETCH_HOTSPOT))?;
    Ok(Json(ApiResponse::success(hotspot.into())))
}
