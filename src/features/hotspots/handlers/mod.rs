mod hotspot_handler;

pub use hotspot_handler::*;
