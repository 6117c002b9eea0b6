//! Detail array shapes produced by the municipality view.
//!
//! Map clients have always received three different shapes and rely on
//! them, so they are kept as-is and produced only here:
//!
//! - a region with votes: its full 6-slot dominant counter
//! - a region without votes: an empty array
//! - the special city, aggregated whole: `[total_votes, 0, 0, 0]`
//!
//! City merging then folds every member into a fresh 6-slot array but only
//! sums slots 0..4, so slots 4 and 5 of merged entries are always zero.

use crate::features::regions::models::FeelingCounter;
use crate::shared::constants::COUNTER_LEN;

/// Slots summed when folding members into a merged city entry
pub const MERGED_SLOTS: usize = 4;

pub fn voted_region_detail(dominant: &FeelingCounter) -> Vec<i64> {
    dominant.to_vec()
}

pub fn unvoted_region_detail() -> Vec<i64> {
    Vec::new()
}

pub fn special_city_detail(total_votes: i64) -> Vec<i64> {
    vec![total_votes, 0, 0, 0]
}

/// Detail of the special city when nobody voted
pub fn special_city_empty_detail() -> Vec<i64> {
    vec![0; COUNTER_LEN]
}

pub fn empty_merged_detail() -> [i64; COUNTER_LEN] {
    [0; COUNTER_LEN]
}

/// Adds slots `0..MERGED_SLOTS` of `member` into `merged`; shorter members
/// contribute zero for their missing slots
pub fn fold_into_merged(merged: &mut [i64; COUNTER_LEN], member: &[i64]) {
    for (slot, value) in merged.iter_mut().take(MERGED_SLOTS).enumerate() {
        *value += member.get(slot).copied().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_drops_trailing_slots() {
        let mut merged = empty_merged_detail();
        fold_into_merged(&mut merged, &[10, 1, 2, 3, 4, 5]);
        fold_into_merged(&mut merged, &[4, 0, 1, 0, 3, 0]);

        assert_eq!(merged, [14, 1, 3, 3, 0, 0]);
    }

    #[test]
    fn test_fold_accepts_short_members() {
        let mut merged = empty_merged_detail();
        fold_into_merged(&mut merged, &unvoted_region_detail());
        fold_into_merged(&mut merged, &special_city_detail(7));

        assert_eq!(merged, [7, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(voted_region_detail(&[2, 1, 0, 1, 0, 0]).len(), 6);
        assert!(unvoted_region_detail().is_empty());
        assert_eq!(special_city_detail(9), vec![9, 0, 0, 0]);
        assert_eq!(special_city_empty_detail(), vec![0; 6]);
    }
}
