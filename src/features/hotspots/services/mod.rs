mod hotspot_service;

pub use hotspot_service::HotspotService;
