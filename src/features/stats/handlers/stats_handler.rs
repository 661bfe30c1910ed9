use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::stats::dtos::StatsDto;
use crate::features::stats::services::StatsService;
use crate::shared::constants::FAILED_TO_FETCH_STATS;
use crate::shared::types::ApiResponse;

/// Get aggregate hotspot statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Counts per risk level and source type, mean readings", body = ApiResponse<StatsDto>),
        (status = 500, description = "Store failure")
    ),
    tag = "stats"
)]
pub async fn get_stats(
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<StatsDto>>> {
    let stats = service
        .compute_stats()
        .await
        .map_err(|e| e.or_message(FAILED_TO_FETCH_STATS))?;
    Ok(Json(ApiResponse::success(stats)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::core::error::DB_CONNECTION_ERROR_MESSAGE;
    use crate::shared::constants::FAILED_TO_FETCH_STATS;
    use crate::features::hotspots::models::{RiskLevel, SourceType};
    use crate::features::hotspots::store::HotspotStore;
    use crate::features::stats::routes::routes;
    use crate::features::stats::services::StatsService;
    use crate::shared::test_helpers::{hotspot, FailingStore, MemoryStore};

    fn server(store: impl HotspotStore + 'static) -> TestServer {
        let service = Arc::new(StatsService::new(Arc::new(store)));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_stats_on_empty_collection() {
        let server = server(MemoryStore::default());

        let response = server.get("/api/stats").await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "data": {
                "totalHotspots": 0,
                "riskLevels": { "high": 0, "medium": 0, "low": 0 },
                "sourceTypes": { "traffic": 0, "industry": 0, "residential": 0 },
                "averages": { "pm25": 0.0, "co2": 0.0 },
            },
        }));
    }

    #[tokio::test]
    async fn test_stats_body() {
        let server = server(MemoryStore::with_records(vec![
            hotspot("BH-001", RiskLevel::High, SourceType::Traffic, 10.0),
            hotspot("BH-002", RiskLevel::Low, SourceType::Residential, 20.0),
        ]));

        let body: Value = server.get("/api/stats").await.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["totalHotspots"], 2);
        assert_eq!(body["data"]["riskLevels"]["high"], 1);
        assert_eq!(body["data"]["riskLevels"]["low"], 1);
        assert_eq!(body["data"]["sourceTypes"]["residential"], 1);
        assert_eq!(body["data"]["averages"]["pm25"], 15.0);
    }

    #[tokio::test]
    async fn test_stats_connection_failure() {
        let server = server(FailingStore::unreachable());

        let response = server.get("/api/stats").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({
            "success": false,
            "error": DB_CONNECTION_ERROR_MESSAGE,
        }));
    }

    #[tokio::test]
    async fn test_stats_empty_failure_message_uses_fallback() {
        let server = server(FailingStore::rejected(None, "   "));

        let response = server.get("/api/stats").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({
            "success": false,
            "error": FAILED_TO_FETCH_STATS,
        }));
    }
}
