//! In-memory stores and stub upstreams for service and router tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::recommendations::models::{
    Category, RecommendationDocument, RecommendationItem,
};
use crate::features::recommendations::RecommendationRepository;
use crate::features::regions::models::{Feeling, FeelingCounter, RegionRecord};
use crate::features::regions::RegionRepository;
use crate::features::weather::models::RefreshMarker;
use crate::features::weather::{RefreshMarkerRepository, WeatherSource};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// REGIONS
// =============================================================================

/// Region store keeping insertion order, like `ORDER BY id`
#[derive(Default)]
pub struct InMemoryRegionRepository {
    records: Mutex<Vec<RegionRecord>>,
    fail_listing: AtomicBool,
    failing_writes: Mutex<HashSet<String>>,
}

impl InMemoryRegionRepository {
    pub fn with_records(records: Vec<RegionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn get(&self, province: &str, name: &str) -> Option<RegionRecord> {
        lock(&self.records)
            .iter()
            .find(|r| r.province == province && r.name == name)
            .cloned()
    }

    /// Makes `list_by_province` fail like an unreachable database
    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Makes `set_temperature` fail for regions with this name
    pub fn fail_writes_for(&self, name: &str) {
        lock(&self.failing_writes).insert(name.to_string());
    }

    fn update<F: FnOnce(&mut RegionRecord)>(&self, province: &str, name: &str, f: F) -> bool {
        let mut records = lock(&self.records);
        match records
            .iter_mut()
            .find(|r| r.province == province && r.name == name)
        {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl RegionRepository for InMemoryRegionRepository {
    async fn list_by_province(&self, province: &str) -> Result<Vec<RegionRecord>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        Ok(lock(&self.records)
            .iter()
            .filter(|r| r.province == province)
            .cloned()
            .collect())
    }

    async fn find(&self, province: &str, name: &str) -> Result<Option<RegionRecord>> {
        Ok(self.get(province, name))
    }

    async fn increment_vote(
        &self,
        province: &str,
        name: &str,
        feeling: Feeling,
        bucket: u8,
    ) -> Result<bool> {
        Ok(self.update(province, name, |record| {
            let counter = record.counter_mut(feeling);
            counter[0] += 1;
            counter[bucket as usize] += 1;
        }))
    }

    async fn set_temperature(
        &self,
        province: &str,
        name: &str,
        temperature: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        if lock(&self.failing_writes).contains(name) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        Ok(self.update(province, name, |record| {
            record.temperature = Some(temperature);
            record.temp_updated_at = Some(updated_at);
        }))
    }

    async fn set_counters(
        &self,
        province: &str,
        name: &str,
        hot: FeelingCounter,
        normal: FeelingCounter,
        cold: FeelingCounter,
    ) -> Result<bool> {
        Ok(self.update(province, name, |record| {
            record.hot = hot;
            record.normal = normal;
            record.cold = cold;
        }))
    }
}

// =============================================================================
// WEATHER
// =============================================================================

#[derive(Default)]
pub struct InMemoryMarkerRepository {
    marker: Mutex<Option<RefreshMarker>>,
}

impl InMemoryMarkerRepository {
    pub fn current(&self) -> Option<RefreshMarker> {
        lock(&self.marker).clone()
    }

    pub fn set(&self, marker: RefreshMarker) {
        *lock(&self.marker) = Some(marker);
    }
}

#[async_trait]
impl RefreshMarkerRepository for InMemoryMarkerRepository {
    async fn get(&self) -> Result<Option<RefreshMarker>> {
        Ok(self.current())
    }

    async fn upsert(&self, marker: &RefreshMarker) -> Result<()> {
        self.set(marker.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        *lock(&self.marker) = None;
        Ok(())
    }
}

/// Canned observation bodies per station; unknown stations fail
#[derive(Default)]
pub struct StubWeatherSource {
    bodies: HashMap<i32, String>,
    calls: Mutex<Vec<i32>>,
}

impl StubWeatherSource {
    pub fn with_body(mut self, station_code: i32, body: String) -> Self {
        self.bodies.insert(station_code, body);
        self
    }

    /// Stations requested so far, in call order
    pub fn calls(&self) -> Vec<i32> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl WeatherSource for StubWeatherSource {
    async fn fetch_observation(&self, station_code: i32) -> Result<String> {
        lock(&self.calls).push(station_code);

        self.bodies.get(&station_code).cloned().ok_or_else(|| {
            AppError::ExternalServiceError(format!("Station {} timed out", station_code))
        })
    }
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

#[derive(Default)]
pub struct InMemoryRecommendationRepository {
    documents: Mutex<HashMap<String, RecommendationDocument>>,
}

impl InMemoryRecommendationRepository {
    pub fn insert(&self, document_key: &str, category: Category, items: Vec<RecommendationItem>) {
        let mut documents = lock(&self.documents);
        *documents
            .entry(document_key.to_string())
            .or_default()
            .items_mut(category) = items;
    }

    pub fn document(&self, document_key: &str) -> RecommendationDocument {
        lock(&self.documents)
            .get(document_key)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn find_document(&self, document_key: &str) -> Result<RecommendationDocument> {
        Ok(self.document(document_key))
    }

    async fn increment_likes(
        &self,
        document_key: &str,
        category: Category,
        name: &str,
    ) -> Result<bool> {
        let mut documents = lock(&self.documents);
        let item = documents
            .get_mut(document_key)
            .and_then(|doc| doc.items_mut(category).iter_mut().find(|i| i.name == name));

        Ok(match item {
            Some(item) => {
                item.likes += 1;
                true
            }
            None => false,
        })
    }

    async fn increment_shown(&self, document_key: &str, name: &str) -> Result<u64> {
        let mut documents = lock(&self.documents);
        let Some(document) = documents.get_mut(document_key) else {
            return Ok(0);
        };

        let mut updated = 0;
        for category in Category::ALL {
            for item in document.items_mut(category).iter_mut().filter(|i| i.name == name) {
                item.shown_count += 1;
                updated += 1;
            }
        }

        Ok(updated)
    }
}
