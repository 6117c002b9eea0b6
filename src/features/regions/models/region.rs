use chrono::{DateTime, Utc};

use crate::features::regions::models::{Feeling, FeelingTotals};
use crate::shared::constants::COUNTER_LEN;

/// `[total, bucket1..bucket5]`; `total` equals the bucket sum
pub type FeelingCounter = [i64; COUNTER_LEN];

/// One region of a province with its vote counters and cached temperature
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub province: String,
    pub name: String,
    pub hot: FeelingCounter,
    pub normal: FeelingCounter,
    pub cold: FeelingCounter,
    pub temperature: Option<f64>,
    pub temp_updated_at: Option<DateTime<Utc>>,
    /// Observation station; 0 means the region is never fetched
    pub station_code: i32,
}

impl RegionRecord {
    #[cfg(test)]
    pub fn new(province: impl Into<String>, name: impl Into<String>, station_code: i32) -> Self {
        Self {
            province: province.into(),
            name: name.into(),
            hot: [0; COUNTER_LEN],
            normal: [0; COUNTER_LEN],
            cold: [0; COUNTER_LEN],
            temperature: None,
            temp_updated_at: None,
            station_code,
        }
    }

    pub fn counter(&self, feeling: Feeling) -> &FeelingCounter {
        match feeling {
            Feeling::Hot => &self.hot,
            Feeling::Normal => &self.normal,
            Feeling::Cold => &self.cold,
        }
    }

    #[cfg(test)]
    pub fn counter_mut(&mut self, feeling: Feeling) -> &mut FeelingCounter {
        match feeling {
            Feeling::Hot => &mut self.hot,
            Feeling::Normal => &mut self.normal,
            Feeling::Cold => &mut self.cold,
        }
    }

    pub fn totals(&self) -> FeelingTotals {
        FeelingTotals {
            hot: self.hot[0],
            normal: self.normal[0],
            cold: self.cold[0],
        }
    }

    pub fn has_station(&self) -> bool {
        self.station_code != 0
    }

    /// Builds a counter from a stored array, zero-filling missing slots
    pub fn counter_from_slice(values: &[i64]) -> FeelingCounter {
        let mut counter = [0; COUNTER_LEN];
        for (slot, value) in counter.iter_mut().zip(values) {
            *slot = *value;
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_from_slice_pads_and_truncates() {
        assert_eq!(RegionRecord::counter_from_slice(&[]), [0; 6]);
        let counter = RegionRecord::counter_from_slice(&[3, 1, 2]);
        assert_eq!(counter, [3, 1, 2, 0, 0, 0]);
        assert_eq!(
            RegionRecord::counter_from_slice(&[1, 1, 0, 0, 0, 0, 9]),
            [1, 1, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_totals_reads_slot_zero() {
        let mut record = RegionRecord::new("경기도", "수원시장안구", 119);
        record.hot = [2, 1, 0, 1, 0, 0];
        record.cold = [4, 0, 0, 0, 0, 4];

        let totals = record.totals();
        assert_eq!(totals.hot, 2);
        assert_eq!(totals.normal, 0);
        assert_eq!(totals.cold, 4);
    }
}
