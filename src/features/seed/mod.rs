//! Loads the static hotspot fixture into the store (`carbonlens-core seed`).
//!
//! The fixture is a JSON array of hotspot records. Seeding validates every
//! record, rejects duplicated zone ids and then replaces the whole collection
//! in one transaction.

pub mod fixture;
mod seed_service;

pub use fixture::load_fixture;
pub use seed_service::{SeedOptions, SeedService, SeedSummary};
