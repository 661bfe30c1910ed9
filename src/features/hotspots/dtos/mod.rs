mod hotspot_dto;

pub use hotspot_dto::*;
