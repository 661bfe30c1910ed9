use async_trait::async_trait;
use chrono::{Duration, Utc};
use fake::faker::address::en::CityName;
use fake::Fake;
use sqlx::error::{DatabaseError, ErrorKind};
use std::borrow::Cow;
use std::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::hotspots::models::{
    Hotspot, HotspotAggregate, HotspotFilter, NewHotspot, RiskLevel, SourceType,
};
use crate::features::hotspots::store::HotspotStore;

/// In-memory store with the same ordering contract as the Postgres store
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Hotspot>>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<NewHotspot>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().map(materialize).collect()),
        }
    }
}

fn materialize(record: NewHotspot) -> Hotspot {
    let now = Utc::now();
    Hotspot {
        id: Uuid::new_v4(),
        zone_id: record.zone_id,
        name: record.name,
        latitude: record.latitude,
        longitude: record.longitude,
        pm25: record.pm25,
        co2: record.co2,
        risk_level: record.risk_level,
        source_type: record.source_type,
        preventive_measures: record.preventive_measures,
        last_updated: record.last_updated,
        created_at: now,
        updated_at: now,
    }
}

fn filter_matches(filter: &HotspotFilter, hotspot: &Hotspot) -> bool {
    filter
        .risk_level
        .is_none_or(|level| hotspot.risk_level == level)
        && filter
            .source_type
            .is_none_or(|source| hotspot.source_type == source)
}

#[async_trait]
impl HotspotStore for MemoryStore {
    async fn find(&self, filter: &HotspotFilter) -> Result<Vec<Hotspot>> {
        let records = self.records.lock().unwrap();
        let mut matching: Vec<Hotspot> = records
            .iter()
            .filter(|&h| filter_matches(filter, h))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(matching)
    }

    async fn find_by_zone_id(&self, zone_id: &str) -> Result<Option<Hotspot>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|h| h.zone_id == zone_id).cloned())
    }

    async fn aggregate(&self) -> Result<HotspotAggregate> {
        let records = self.records.lock().unwrap();
        let count = |pred: &dyn Fn(&Hotspot) -> bool| {
            records.iter().filter(|&h| pred(h)).count() as i64
        };
        let mean = |field: fn(&Hotspot) -> f64| {
            (!records.is_empty())
                .then(|| records.iter().map(field).sum::<f64>() / records.len() as f64)
        };

        Ok(HotspotAggregate {
            total: records.len() as i64,
            high: count(&|h: &Hotspot| h.risk_level == RiskLevel::High),
            medium: count(&|h: &Hotspot| h.risk_level == RiskLevel::Medium),
            low: count(&|h: &Hotspot| h.risk_level == RiskLevel::Low),
            traffic: count(&|h: &Hotspot| h.source_type == SourceType::Traffic),
            industry: count(&|h: &Hotspot| h.source_type == SourceType::Industry),
            residential: count(&|h: &Hotspot| h.source_type == SourceType::Residential),
            avg_pm25: mean(|h: &Hotspot| h.pm25),
            avg_co2: mean(|h: &Hotspot| h.co2),
        })
    }

    async fn replace_all(&self, records: &[NewHotspot]) -> Result<u64> {
        let mut stored = self.records.lock().unwrap();
        *stored = records.iter().cloned().map(materialize).collect();
        Ok(stored.len() as u64)
    }
}

/// Server-side database error with an optional SQLSTATE code
#[derive(Debug)]
pub struct SqlStateError {
    code: Option<String>,
    message: String,
}

impl SqlStateError {
    pub fn new(code: Option<&str>, message: &str) -> Self {
        Self {
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for SqlStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SqlStateError {}

impl DatabaseError for SqlStateError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        self.code.as_deref().map(Cow::Borrowed)
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Store whose every call fails
pub enum FailingStore {
    /// The store cannot be reached
    Unreachable,
    /// The store was reached but the query failed with this message
    Query(String),
    /// The database server rejected the query
    Rejected(Option<String>, String),
}

impl FailingStore {
    pub fn unreachable() -> Self {
        FailingStore::Unreachable
    }

    pub fn query(message: &str) -> Self {
        FailingStore::Query(message.to_string())
    }

    pub fn rejected(code: Option<&str>, message: &str) -> Self {
        FailingStore::Rejected(code.map(str::to_string), message.to_string())
    }

    fn error(&self) -> AppError {
        match self {
            FailingStore::Unreachable => AppError::Database(sqlx::Error::PoolTimedOut),
            FailingStore::Query(msg) => AppError::Database(sqlx::Error::Protocol(msg.clone())),
            FailingStore::Rejected(code, msg) => {
                AppError::Database(SqlStateError::new(code.as_deref(), msg).into())
            }
        }
    }
}

#[async_trait]
impl HotspotStore for FailingStore {
    async fn find(&self, _filter: &HotspotFilter) -> Result<Vec<Hotspot>> {
        Err(self.error())
    }

    async fn find_by_zone_id(&self, _zone_id: &str) -> Result<Option<Hotspot>> {
        Err(self.error())
    }

    async fn aggregate(&self) -> Result<HotspotAggregate> {
        Err(self.error())
    }

    async fn replace_all(&self, _records: &[NewHotspot]) -> Result<u64> {
        Err(self.error())
    }
}

/// A deterministic record with the given classification and pm25
pub fn hotspot(
    zone_id: &str,
    risk_level: RiskLevel,
    source_type: SourceType,
    pm25: f64,
) -> NewHotspot {
    NewHotspot {
        zone_id: zone_id.to_string(),
        name: format!("Zone {}", zone_id),
        latitude: 20.2961,
        longitude: 85.8245,
        pm25,
        co2: 400.0,
        risk_level,
        source_type,
        preventive_measures: vec!["Promote public transportation".to_string()],
        last_updated: Utc::now(),
    }
}

/// `n` records with unique zone ids and random readings around Bhubaneswar
pub fn random_hotspots(n: usize) -> Vec<NewHotspot> {
    let now = Utc::now();
    (0..n)
        .map(|i| NewHotspot {
            zone_id: format!("BH-{:03}", i + 1),
            name: CityName().fake(),
            latitude: (20.15..20.45).fake(),
            longitude: (85.65..85.95).fake(),
            pm25: (20.0..150.0).fake(),
            co2: (250.0..600.0).fake(),
            risk_level: RiskLevel::ALL[(0..3usize).fake::<usize>()],
            source_type: SourceType::ALL[(0..3usize).fake::<usize>()],
            preventive_measures: (0..(0..4usize).fake::<usize>())
                .map(|m| format!("Measure {}", m + 1))
                .collect(),
            last_updated: now - Duration::hours((0..168i64).fake::<i64>()),
        })
        .collect()
}
