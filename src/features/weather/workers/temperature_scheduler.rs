use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::SchedulerConfig;
use crate::features::weather::models::RefreshOutcome;
use crate::features::weather::services::TemperatureRefreshService;

/// Background worker that refreshes temperatures on a fixed period
pub struct TemperatureScheduler {
    service: Arc<TemperatureRefreshService>,
    period: Duration,
    first_run_delay: Duration,
}

impl TemperatureScheduler {
    pub fn new(service: Arc<TemperatureRefreshService>, config: &SchedulerConfig) -> Self {
        Self {
            service,
            period: config.refresh_interval,
            first_run_delay: config.first_run_delay,
        }
    }

    /// Run the scheduler loop. Never returns; a failed tick is logged and
    /// the next one runs on schedule.
    pub async fn run(&self) {
        tracing::info!(
            "Starting temperature scheduler (first run in {:?}, then every {:?})",
            self.first_run_delay,
            self.period
        );

        tokio::time::sleep(self.first_run_delay).await;

        let mut interval = interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    async fn tick(&self) {
        match self.service.scheduled_refresh().await {
            Ok(RefreshOutcome::Skipped) => {
                tracing::debug!("Scheduled temperature refresh skipped");
            }
            Ok(RefreshOutcome::Completed(report)) => {
                tracing::info!(
                    "Scheduled temperature refresh done: {} updated, {} failed",
                    report.updated,
                    report.failed
                );
            }
            Err(e) => {
                tracing::error!("Scheduled temperature refresh failed: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WeatherApiConfig;
    use crate::features::regions::models::RegionRecord;
    use crate::features::weather::models::RefreshStatus;
    use crate::shared::test_helpers::{
        InMemoryMarkerRepository, InMemoryRegionRepository, StubWeatherSource,
    };

    #[tokio::test]
    async fn test_tick_records_completed_marker() {
        let regions = Arc::new(InMemoryRegionRepository::with_records(vec![
            RegionRecord::new("제주특별자치도", "제주시", 184),
        ]));
        let markers = Arc::new(InMemoryMarkerRepository::default());
        let source = Arc::new(StubWeatherSource::default().with_body(
            184,
            "202410191200 184 0 0 0 0 0 0 18.2 0\n".to_string(),
        ));
        let weather = WeatherApiConfig {
            base_url: "http://unused.test".to_string(),
            auth_key: "test".to_string(),
            request_timeout: Duration::from_secs(1),
            request_delay: Duration::ZERO,
            stale_after: Duration::from_secs(1800),
        };
        let service = Arc::new(TemperatureRefreshService::new(
            regions.clone(),
            markers.clone(),
            source,
            &weather,
        ));
        let scheduler = TemperatureScheduler::new(
            service,
            &SchedulerConfig {
                refresh_interval: Duration::from_secs(1800),
                first_run_delay: Duration::ZERO,
            },
        );

        scheduler.tick().await;

        assert_eq!(
            markers.current().map(|m| m.status),
            Some(RefreshStatus::Completed)
        );
        assert_eq!(
            regions.get("제주특별자치도", "제주시").unwrap().temperature,
            Some(18.2)
        );
    }
}
