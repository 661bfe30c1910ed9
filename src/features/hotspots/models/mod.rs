mod hotspot;

pub use hotspot::{Hotspot, HotspotAggregate, HotspotFilter, NewHotspot, RiskLevel, SourceType};
