pub mod hotspots;
pub mod seed;
pub mod stats;
