//! Vote aggregation over region counters.
//!
//! Everything here is pure: callers load the region records and pass them
//! in, so the rules can be tested without a store.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::features::regions::models::{Feeling, FeelingCounter, FeelingTotals, RegionRecord};
use crate::features::regions::services::detail_shape;
use crate::shared::constants::{
    CITY_SUFFIX, MERGE_CITIES, NORMAL_TEMPERATURE_C, RANKING_LIMIT, SPECIAL_CITY,
};

/// Regions of one province as loaded from the store
#[derive(Debug, Clone)]
pub struct ProvinceRegions {
    pub province: String,
    pub regions: Vec<RegionRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionAnalysis {
    pub dominant_feeling: Feeling,
    /// Counter of the dominant feeling, total included
    pub dominant_array: FeelingCounter,
    pub totals: FeelingTotals,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvinceAggregate {
    pub totals: FeelingTotals,
    /// Dominant counter of every region with at least one vote
    pub region_details: BTreeMap<String, Vec<i64>>,
}

/// Map-level view: feeling and detail array per displayed area
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherView {
    pub stats: BTreeMap<String, Feeling>,
    pub details: BTreeMap<String, Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub province: String,
    pub region: String,
    /// Vote count of the region's own dominant feeling
    pub votes: i64,
    pub temperature: Option<f64>,
    pub station_code: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub most_voted_feeling: Feeling,
    pub vote_top_regions: Vec<RankingEntry>,
    pub temp_top_regions: Vec<RankingEntry>,
    pub total_votes: FeelingTotals,
}

pub fn analyze_region(record: &RegionRecord) -> RegionAnalysis {
    let totals = record.totals();
    let dominant_feeling = totals.dominant();

    RegionAnalysis {
        dominant_feeling,
        dominant_array: *record.counter(dominant_feeling),
        totals,
    }
}

pub fn aggregate_province(regions: &[RegionRecord]) -> ProvinceAggregate {
    let mut aggregate = ProvinceAggregate::default();

    for record in regions {
        let analysis = analyze_region(record);
        aggregate.totals.accumulate(&analysis.totals);

        if analysis.totals.max() > 0 {
            aggregate
                .region_details
                .insert(record.name.clone(), analysis.dominant_array.to_vec());
        }
    }

    aggregate
}

/// Dominant feeling of a whole province; `normal` when nobody voted
pub fn province_feeling(totals: &FeelingTotals) -> Feeling {
    if totals.max() > 0 {
        totals.dominant()
    } else {
        Feeling::Normal
    }
}

/// One entry per province plus the detail arrays of every voted region.
/// Region names repeated across provinces keep the last province's entry.
pub fn province_view(provinces: &[ProvinceRegions]) -> WeatherView {
    let mut view = WeatherView::default();

    for group in provinces {
        let aggregate = aggregate_province(&group.regions);
        view.stats
            .insert(group.province.clone(), province_feeling(&aggregate.totals));
        view.details.extend(aggregate.region_details);
    }

    view
}

/// Per-region entries before city merging. The special city is collapsed
/// into a single entry.
pub fn municipality_entries(provinces: &[ProvinceRegions]) -> WeatherView {
    let mut view = WeatherView::default();

    for group in provinces {
        if group.province == SPECIAL_CITY {
            let totals = aggregate_province(&group.regions).totals;
            let detail = if totals.max() > 0 {
                detail_shape::special_city_detail(totals.sum())
            } else {
                detail_shape::special_city_empty_detail()
            };
            view.stats
                .insert(group.province.clone(), province_feeling(&totals));
            view.details.insert(group.province.clone(), detail);
            continue;
        }

        for record in &group.regions {
            let analysis = analyze_region(record);
            let (feeling, detail) = if analysis.totals.sum() > 0 {
                (
                    analysis.dominant_feeling,
                    detail_shape::voted_region_detail(&analysis.dominant_array),
                )
            } else {
                (Feeling::Normal, detail_shape::unvoted_region_detail())
            };
            view.stats.insert(record.name.clone(), feeling);
            view.details.insert(record.name.clone(), detail);
        }
    }

    view
}

/// Display name a district is merged under; unmatched names map to themselves
pub fn city_for_district(district: &str) -> String {
    MERGE_CITIES
        .iter()
        .find(|city| district.contains(*city))
        .map(|city| format!("{}{}", city, CITY_SUFFIX))
        .unwrap_or_else(|| district.to_string())
}

#[derive(Debug, Default)]
struct CityTally {
    hot: u32,
    normal: u32,
    cold: u32,
    detail: [i64; 6],
}

impl CityTally {
    fn count(&mut self, feeling: Feeling) {
        match feeling {
            Feeling::Hot => self.hot += 1,
            Feeling::Normal => self.normal += 1,
            Feeling::Cold => self.cold += 1,
        }
    }

    /// Feeling carried by the most member districts; ties go hot, normal, cold
    fn plurality(&self) -> Feeling {
        let max = self.hot.max(self.normal).max(self.cold);
        if self.hot == max {
            Feeling::Hot
        } else if self.normal == max {
            Feeling::Normal
        } else {
            Feeling::Cold
        }
    }
}

/// Folds districts of the merge cities into one entry per city. Every entry
/// passes through the fold, so all output arrays come back with 6 slots.
pub fn merge_cities(view: WeatherView) -> WeatherView {
    let mut tallies: BTreeMap<String, CityTally> = BTreeMap::new();

    for (region, feeling) in &view.stats {
        let tally = tallies.entry(city_for_district(region)).or_default();
        tally.count(*feeling);

        if let Some(detail) = view.details.get(region) {
            detail_shape::fold_into_merged(&mut tally.detail, detail);
        }
    }

    let mut merged = WeatherView::default();
    for (city, tally) in tallies {
        merged.stats.insert(city.clone(), tally.plurality());
        merged.details.insert(city, tally.detail.to_vec());
    }

    merged
}

pub fn municipality_view(provinces: &[ProvinceRegions]) -> WeatherView {
    merge_cities(municipality_entries(provinces))
}

pub fn build_ranking(provinces: &[ProvinceRegions]) -> Ranking {
    let mut total_votes = FeelingTotals::default();
    let mut entries = Vec::new();

    for group in provinces {
        for record in &group.regions {
            let totals = record.totals();
            total_votes.accumulate(&totals);

            entries.push(RankingEntry {
                province: group.province.clone(),
                region: record.name.clone(),
                votes: totals.max(),
                temperature: record.temperature,
                station_code: record.station_code,
            });
        }
    }

    let most_voted_feeling = total_votes.dominant();

    let mut temp_top_regions: Vec<RankingEntry> = entries
        .iter()
        .filter(|entry| entry.temperature.is_some())
        .cloned()
        .collect();
    sort_by_temperature(&mut temp_top_regions, most_voted_feeling);
    temp_top_regions.truncate(RANKING_LIMIT);

    let mut vote_top_regions = entries;
    vote_top_regions.sort_by(|a, b| b.votes.cmp(&a.votes));
    vote_top_regions.truncate(RANKING_LIMIT);

    Ranking {
        most_voted_feeling,
        vote_top_regions,
        temp_top_regions,
        total_votes,
    }
}

/// Hottest first when `hot` leads, coldest first for `cold`, closest to
/// 20°C first for `normal`. Entries must all carry a temperature.
fn sort_by_temperature(entries: &mut [RankingEntry], leading: Feeling) {
    let temp = |entry: &RankingEntry| entry.temperature.unwrap_or(f64::NAN);

    match leading {
        Feeling::Hot => entries.sort_by(|a, b| temp(b).total_cmp(&temp(a))),
        Feeling::Cold => entries.sort_by(|a, b| temp(a).total_cmp(&temp(b))),
        Feeling::Normal => entries.sort_by(|a, b| {
            (temp(a) - NORMAL_TEMPERATURE_C)
                .abs()
                .total_cmp(&(temp(b) - NORMAL_TEMPERATURE_C).abs())
        }),
    }
}
