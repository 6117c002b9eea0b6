use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::core::config::WeatherApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::regions::models::RegionRecord;
use crate::features::regions::services::RegionService;
use crate::features::regions::RegionRepository;
use crate::features::weather::models::{
    RefreshMarker, RefreshOutcome, RefreshReport, RefreshStatus,
};
use crate::features::weather::services::observation_parser::parse_temperature;
use crate::features::weather::{RefreshMarkerRepository, WeatherSource};
use crate::shared::constants::PROVINCES;

/// Keeps cached region temperatures in sync with station observations.
///
/// Refreshes are debounced through a marker persisted in the store, so every
/// process sees the same state. The marker is read then written, which
/// leaves a window where two callers may both start a refresh.
pub struct TemperatureRefreshService {
    regions: Arc<dyn RegionRepository>,
    markers: Arc<dyn RefreshMarkerRepository>,
    source: Arc<dyn WeatherSource>,
    request_delay: Duration,
    stale_after: chrono::Duration,
}

impl TemperatureRefreshService {
    pub fn new(
        regions: Arc<dyn RegionRepository>,
        markers: Arc<dyn RefreshMarkerRepository>,
        source: Arc<dyn WeatherSource>,
        config: &WeatherApiConfig,
    ) -> Self {
        Self {
            regions,
            markers,
            source,
            request_delay: config.request_delay,
            stale_after: chrono::Duration::from_std(config.stale_after)
                .unwrap_or_else(|_| chrono::Duration::minutes(30)),
        }
    }

    /// True when no refresh was ever recorded or the last one is stale.
    /// Never writes.
    pub async fn should_refresh(&self) -> Result<bool> {
        match self.markers.get().await? {
            None => Ok(true),
            Some(marker) => Ok(marker.age(Utc::now()) > self.stale_after),
        }
    }

    /// Refreshes every region unless the cached readings are recent
    pub async fn smart_refresh(&self) -> Result<RefreshOutcome> {
        if !self.should_refresh().await? {
            tracing::info!("Temperature data refreshed recently, skipping");
            return Ok(RefreshOutcome::Skipped);
        }

        self.run_marked().await
    }

    /// Periodic refresh. Yields only to a refresh that is still running;
    /// a completed marker never blocks the schedule.
    pub async fn scheduled_refresh(&self) -> Result<RefreshOutcome> {
        if let Some(marker) = self.markers.get().await? {
            let running = marker.status == RefreshStatus::Updating
                && marker.age(Utc::now()) <= self.stale_after;
            if running {
                tracing::info!(
                    "Temperature refresh already running since {}, skipping tick",
                    marker.updated_at
                );
                return Ok(RefreshOutcome::Skipped);
            }
        }

        self.run_marked().await
    }

    async fn run_marked(&self) -> Result<RefreshOutcome> {
        self.markers
            .upsert(&RefreshMarker::updating(Utc::now()))
            .await?;

        match self.refresh_all().await {
            Ok(report) => {
                self.markers
                    .upsert(&RefreshMarker::completed(Utc::now()))
                    .await?;
                Ok(RefreshOutcome::Completed(report))
            }
            Err(e) => {
                // Clearing the marker makes the next call eligible immediately
                if let Err(delete_err) = self.markers.delete().await {
                    tracing::error!(
                        "Failed to clear refresh marker after failure: {:?}",
                        delete_err
                    );
                }
                Err(AppError::RefreshFailed(e.to_string()))
            }
        }
    }

    /// Fetches a reading for every region with a station. Per-region
    /// failures, including a failed write, are logged and counted; only a
    /// failed province listing aborts the pass.
    pub async fn refresh_all(&self) -> Result<RefreshReport> {
        tracing::info!("Temperature refresh started");
        let mut report = RefreshReport::default();

        for province in PROVINCES {
            let regions = self.regions.list_by_province(province).await?;
            tracing::debug!("Refreshing {} regions of {}", regions.len(), province);

            for record in &regions {
                if !record.has_station() {
                    report.skipped += 1;
                    continue;
                }

                match self.refresh_record(record).await {
                    Ok(()) => report.updated += 1,
                    Err(e) => {
                        tracing::warn!(
                            "Temperature refresh failed for {} {}: {}",
                            province,
                            record.name,
                            e
                        );
                        report.failed += 1;
                    }
                }

                tokio::time::sleep(self.request_delay).await;
            }
        }

        if report.is_partial() {
            tracing::warn!(
                "Temperature refresh finished with failures: {} updated, {} failed",
                report.updated,
                report.failed
            );
        } else {
            tracing::info!(
                "Temperature refresh finished: {} updated, {} without station",
                report.updated,
                report.skipped
            );
        }

        Ok(report)
    }

    /// Refreshes one province, or one named region of it. Returns the
    /// number of regions updated; failing regions are skipped.
    pub async fn refresh_region(&self, province: &str, region: Option<&str>) -> Result<usize> {
        RegionService::ensure_known_province(province)?;

        let records = match region {
            Some(name) => {
                let record = self.regions.find(province, name).await?.ok_or_else(|| {
                    AppError::NotFound(format!("Region '{}' not found in {}", name, province))
                })?;
                vec![record]
            }
            None => self.regions.list_by_province(province).await?,
        };

        let mut updated = 0;
        for record in records.iter().filter(|r| r.has_station()) {
            match self.refresh_record(record).await {
                Ok(()) => updated += 1,
                Err(e) => tracing::warn!(
                    "Temperature refresh failed for {} {}: {}",
                    province,
                    record.name,
                    e
                ),
            }
        }

        Ok(updated)
    }

    async fn refresh_record(&self, record: &RegionRecord) -> Result<()> {
        let body = self.source.fetch_observation(record.station_code).await?;

        let temperature = parse_temperature(&body).ok_or_else(|| {
            AppError::ExternalServiceError(format!(
                "Malformed observation for station {}",
                record.station_code
            ))
        })?;

        let written = self
            .regions
            .set_temperature(&record.province, &record.name, temperature, Utc::now())
            .await?;
        if !written {
            return Err(AppError::NotFound(format!(
                "Region '{}' disappeared from {}",
                record.name, record.province
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        InMemoryMarkerRepository, InMemoryRegionRepository, StubWeatherSource,
    };

    fn config() -> WeatherApiConfig {
        WeatherApiConfig {
            base_url: "http://unused.test".to_string(),
            auth_key: "test".to_string(),
            request_timeout: Duration::from_secs(1),
            request_delay: Duration::ZERO,
            stale_after: Duration::from_secs(1800),
        }
    }

    struct Fixture {
        service: TemperatureRefreshService,
        regions: Arc<InMemoryRegionRepository>,
        markers: Arc<InMemoryMarkerRepository>,
        source: Arc<StubWeatherSource>,
    }

    fn fixture(records: Vec<RegionRecord>, source: StubWeatherSource) -> Fixture {
        let regions = Arc::new(InMemoryRegionRepository::with_records(records));
        let markers = Arc::new(InMemoryMarkerRepository::default());
        let source = Arc::new(source);
        let service = TemperatureRefreshService::new(
            regions.clone(),
            markers.clone(),
            source.clone(),
            &config(),
        );
        Fixture {
            service,
            regions,
            markers,
            source,
        }
    }

    fn observation(temperature: &str) -> String {
        format!(
            "#START7777\n202410191200 108 0 0 0 0 0 0 {} 0\n#7777END\n",
            temperature
        )
    }

    fn standard_regions() -> Vec<RegionRecord> {
        vec![
            RegionRecord::new("서울특별시", "종로구", 108),
            RegionRecord::new("경기도", "가평군", 0),
            RegionRecord::new("강원도", "춘천시", 101),
            RegionRecord::new("강원도", "홍천군", 212),
        ]
    }

    #[tokio::test]
    async fn test_refresh_all_isolates_failures() {
        let source = StubWeatherSource::default()
            .with_body(108, observation("21.5"))
            .with_body(101, observation("-3.0"))
            .with_body(212, "no data rows here".to_string());
        let f = fixture(standard_regions(), source);

        let report = f.service.refresh_all().await.unwrap();

        assert_eq!(
            report,
            RefreshReport {
                updated: 2,
                failed: 1,
                skipped: 1
            }
        );
        assert!(report.is_partial());
        assert_eq!(
            f.regions.get("서울특별시", "종로구").unwrap().temperature,
            Some(21.5)
        );
        assert_eq!(
            f.regions.get("강원도", "춘천시").unwrap().temperature,
            Some(-3.0)
        );
        let hongcheon = f.regions.get("강원도", "홍천군").unwrap();
        assert_eq!(hongcheon.temperature, None);
        assert!(hongcheon.temp_updated_at.is_none());
    }

    #[tokio::test]
    async fn test_refresh_all_continues_after_failed_write() {
        let source = StubWeatherSource::default()
            .with_body(108, observation("21.5"))
            .with_body(101, observation("-3.0"))
            .with_body(212, observation("2.0"));
        let f = fixture(standard_regions(), source);
        f.regions.fail_writes_for("종로구");

        let outcome = f.service.smart_refresh().await.unwrap();

        assert_eq!(
            outcome,
            RefreshOutcome::Completed(RefreshReport {
                updated: 2,
                failed: 1,
                skipped: 1
            })
        );
        assert_eq!(
            f.regions.get("서울특별시", "종로구").unwrap().temperature,
            None
        );
        assert_eq!(
            f.regions.get("강원도", "춘천시").unwrap().temperature,
            Some(-3.0)
        );
        assert_eq!(
            f.markers.current().unwrap().status,
            RefreshStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_write_to_vanished_region_is_a_failure() {
        let f = fixture(
            vec![],
            StubWeatherSource::default().with_body(101, observation("4.4")),
        );

        let result = f
            .service
            .refresh_record(&RegionRecord::new("강원도", "춘천시", 101))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_refresh_all_never_calls_stationless_regions() {
        let f = fixture(
            vec![RegionRecord::new("경기도", "가평군", 0)],
            StubWeatherSource::default(),
        );

        let report = f.service.refresh_all().await.unwrap();

        assert_eq!(report.skipped, 1);
        assert!(f.source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_smart_refresh_debounces_second_call() {
        let source = StubWeatherSource::default()
            .with_body(108, observation("21.5"))
            .with_body(101, observation("10.0"))
            .with_body(212, observation("9.0"));
        let f = fixture(standard_regions(), source);

        let first = f.service.smart_refresh().await.unwrap();
        let second = f.service.smart_refresh().await.unwrap();

        assert_eq!(first.updated(), 3);
        assert_eq!(second, RefreshOutcome::Skipped);
        assert_eq!(second.updated(), 0);
        assert_eq!(f.source.calls().len(), 3);
        assert_eq!(
            f.markers.current().unwrap().status,
            RefreshStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_smart_refresh_runs_when_marker_is_stale() {
        let f = fixture(
            vec![RegionRecord::new("강원도", "춘천시", 101)],
            StubWeatherSource::default().with_body(101, observation("4.4")),
        );
        f.markers
            .set(RefreshMarker::completed(Utc::now() - chrono::Duration::minutes(31)));

        assert!(f.service.should_refresh().await.unwrap());
        let outcome = f.service.smart_refresh().await.unwrap();

        assert_eq!(outcome.updated(), 1);
    }

    #[tokio::test]
    async fn test_should_refresh_does_not_write() {
        let f = fixture(vec![], StubWeatherSource::default());

        assert!(f.service.should_refresh().await.unwrap());
        assert!(f.markers.current().is_none());
    }

    #[tokio::test]
    async fn test_hard_failure_clears_marker() {
        let f = fixture(standard_regions(), StubWeatherSource::default());
        f.regions.fail_listing(true);

        let result = f.service.smart_refresh().await;

        assert!(matches!(result, Err(AppError::RefreshFailed(_))));
        assert!(f.markers.current().is_none());

        f.regions.fail_listing(false);
        assert!(f.service.should_refresh().await.unwrap());
    }

    #[tokio::test]
    async fn test_scheduled_refresh_yields_to_running_refresh() {
        let f = fixture(
            vec![RegionRecord::new("강원도", "춘천시", 101)],
            StubWeatherSource::default().with_body(101, observation("4.4")),
        );
        f.markers.set(RefreshMarker::updating(Utc::now()));

        let outcome = f.service.scheduled_refresh().await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Skipped);
        assert!(f.source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scheduled_refresh_ignores_recent_completion() {
        let f = fixture(
            vec![RegionRecord::new("강원도", "춘천시", 101)],
            StubWeatherSource::default().with_body(101, observation("4.4")),
        );
        f.markers.set(RefreshMarker::completed(Utc::now()));

        let outcome = f.service.scheduled_refresh().await.unwrap();

        assert_eq!(outcome.updated(), 1);
    }

    #[tokio::test]
    async fn test_refresh_region_scopes_to_named_region() {
        let source = StubWeatherSource::default()
            .with_body(101, observation("4.4"))
            .with_body(212, observation("2.0"));
        let f = fixture(standard_regions(), source);

        let updated = f
            .service
            .refresh_region("강원도", Some("홍천군"))
            .await
            .unwrap();

        assert_eq!(updated, 1);
        assert_eq!(f.source.calls(), vec![212]);
        assert_eq!(f.regions.get("강원도", "춘천시").unwrap().temperature, None);
    }

    #[tokio::test]
    async fn test_refresh_region_whole_province_skips_failures() {
        let source = StubWeatherSource::default().with_body(101, observation("4.4"));
        let f = fixture(standard_regions(), source);

        let updated = f.service.refresh_region("강원도", None).await.unwrap();

        assert_eq!(updated, 1);
        assert_eq!(f.source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_region_unknown_targets() {
        let f = fixture(standard_regions(), StubWeatherSource::default());

        assert!(matches!(
            f.service.refresh_region("아무도", None).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.refresh_region("강원도", Some("없는군")).await,
            Err(AppError::NotFound(_))
        ));
    }
}
