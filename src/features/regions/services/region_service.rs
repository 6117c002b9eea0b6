use std::sync::Arc;

use rand::Rng;

use crate::core::error::{AppError, Result};
use crate::features::regions::models::{Feeling, FeelingCounter, FeelingTotals, RegionRecord};
use crate::features::regions::repositories::RegionRepository;
use crate::features::regions::services::aggregation::{
    self, ProvinceRegions, Ranking, RegionAnalysis, WeatherView,
};
use crate::shared::constants::{COUNTER_LEN, DETAIL_BUCKETS, PROVINCES};

/// Map granularity requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLevel {
    Provinces,
    Municipalities,
}

/// State of a region right after a vote was recorded
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub region: String,
    pub analysis: RegionAnalysis,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionInfo {
    pub analysis: RegionAnalysis,
    pub temperature: Option<f64>,
}

/// Service computing vote statistics on demand from stored counters
pub struct RegionService {
    repository: Arc<dyn RegionRepository>,
}

impl RegionService {
    pub fn new(repository: Arc<dyn RegionRepository>) -> Self {
        Self { repository }
    }

    pub fn ensure_known_province(province: &str) -> Result<()> {
        if PROVINCES.contains(&province) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Province '{}' not found",
                province
            )))
        }
    }

    async fn load_provinces(&self, only: Option<&str>) -> Result<Vec<ProvinceRegions>> {
        let mut groups = Vec::with_capacity(PROVINCES.len());

        for province in PROVINCES {
            if only.is_some_and(|wanted| wanted != province) {
                continue;
            }
            let regions = self.repository.list_by_province(province).await?;
            groups.push(ProvinceRegions {
                province: province.to_string(),
                regions,
            });
        }

        Ok(groups)
    }

    async fn find_region(&self, province: &str, region: &str) -> Result<RegionRecord> {
        Self::ensure_known_province(province)?;

        self.repository
            .find(province, region)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Region '{}' not found in {}", region, province))
            })
    }

    /// Sorted region names of one province
    pub async fn list_region_names(&self, province: &str) -> Result<Vec<String>> {
        Self::ensure_known_province(province)?;

        let mut names: Vec<String> = self
            .repository
            .list_by_province(province)
            .await?
            .into_iter()
            .map(|record| record.name)
            .collect();
        names.sort();

        Ok(names)
    }

    /// Adds one vote to `feeling` total and its detail bucket
    pub async fn record_vote(
        &self,
        province: &str,
        region: &str,
        feeling: Feeling,
        bucket: u8,
    ) -> Result<VoteOutcome> {
        if !(1..=DETAIL_BUCKETS).contains(&bucket) {
            return Err(AppError::Validation(format!(
                "Detail bucket must be between 1 and {}, got {}",
                DETAIL_BUCKETS, bucket
            )));
        }
        Self::ensure_known_province(province)?;

        let matched = self
            .repository
            .increment_vote(province, region, feeling, bucket)
            .await?;
        if !matched {
            tracing::warn!("Vote for unknown region {} {} ignored", province, region);
            return Err(AppError::NotFound(format!(
                "Region '{}' not found in {}",
                region, province
            )));
        }

        let record = self.find_region(province, region).await?;
        tracing::debug!(
            "Recorded {} vote (bucket {}) for {} {}",
            feeling,
            bucket,
            province,
            region
        );

        Ok(VoteOutcome {
            region: record.name.clone(),
            analysis: aggregation::analyze_region(&record),
            temperature: record.temperature,
        })
    }

    /// Map view at province or municipality granularity. `province`
    /// narrows the municipality view to one province.
    pub async fn get_weather_data(
        &self,
        level: MapLevel,
        province: Option<&str>,
    ) -> Result<WeatherView> {
        match level {
            MapLevel::Provinces => {
                let groups = self.load_provinces(None).await?;
                Ok(aggregation::province_view(&groups))
            }
            MapLevel::Municipalities => {
                if let Some(name) = province {
                    Self::ensure_known_province(name)?;
                }
                let groups = self.load_provinces(province).await?;
                Ok(aggregation::municipality_view(&groups))
            }
        }
    }

    /// Province-wide vote totals
    pub async fn get_raw_stats(&self, province: &str) -> Result<FeelingTotals> {
        Self::ensure_known_province(province)?;

        let regions = self.repository.list_by_province(province).await?;
        Ok(aggregation::aggregate_province(&regions).totals)
    }

    pub async fn get_region_info(&self, province: &str, region: &str) -> Result<RegionInfo> {
        let record = self.find_region(province, region).await?;

        Ok(RegionInfo {
            analysis: aggregation::analyze_region(&record),
            temperature: record.temperature,
        })
    }

    /// Cached temperature of a region; `None` when the region or reading is unknown
    pub async fn get_temperature(&self, province: &str, region: &str) -> Result<Option<f64>> {
        if Self::ensure_known_province(province).is_err() {
            return Ok(None);
        }

        Ok(self
            .repository
            .find(province, region)
            .await?
            .and_then(|record| record.temperature))
    }

    /// First province, in static order, holding a region with this name
    pub async fn find_province_by_region(&self, region: &str) -> Result<String> {
        for province in PROVINCES {
            if self.repository.find(province, region).await?.is_some() {
                return Ok(province.to_string());
            }
        }

        Err(AppError::NotFound(format!("Region '{}' not found", region)))
    }

    pub async fn get_ranking(&self) -> Result<Ranking> {
        let groups = self.load_provinces(None).await?;
        let ranking = aggregation::build_ranking(&groups);

        tracing::debug!(
            "Ranking computed: leading feeling {} over {} votes",
            ranking.most_voted_feeling,
            ranking.total_votes.sum()
        );

        Ok(ranking)
    }

    /// Overwrites every region's counters with random, internally consistent
    /// values. Returns the number of regions updated.
    pub async fn generate_test_data<R: Rng + Send>(&self, rng: &mut R) -> Result<usize> {
        let mut updated = 0;

        for province in PROVINCES {
            for record in self.repository.list_by_province(province).await? {
                let hot = random_counter(rng);
                let normal = random_counter(rng);
                let cold = random_counter(rng);

                if self
                    .repository
                    .set_counters(province, &record.name, hot, normal, cold)
                    .await?
                {
                    updated += 1;
                }
            }
        }

        tracing::info!("Generated test votes for {} regions", updated);
        Ok(updated)
    }
}

fn random_counter<R: Rng>(rng: &mut R) -> FeelingCounter {
    let mut counter = [0; COUNTER_LEN];
    for slot in counter.iter_mut().skip(1) {
        *slot = rng.gen_range(0..=20);
    }
    counter[0] = counter[1..].iter().sum();
    counter
}
