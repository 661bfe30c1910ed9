//! Emission hotspots feature.
//!
//! Read-only access to the hotspot collection shown on the dashboard list
//! and map views.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/hotspots` | List hotspots, optional `risk_level` / `source_type` filters |
//! | GET | `/api/hotspots/{id}` | Get a hotspot by zone id |

pub mod assessment;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::HotspotService;
pub use store::{HotspotStore, PgHotspotStore};
