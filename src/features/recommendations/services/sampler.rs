//! Popularity-weighted selection without repeats inside a round.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::features::recommendations::models::RecommendationItem;
use crate::shared::constants::EXPLORATION_RATE;

/// Picks the next item to offer and records its name in `shown`.
///
/// Returns `None` when `items` is empty or the round already offered as
/// many names as there are items. Items already shown are skipped; if that
/// leaves nothing (duplicate names) the whole list is used again.
pub fn select_next<'a, R: Rng>(
    items: &'a [RecommendationItem],
    shown: &mut HashSet<String>,
    rng: &mut R,
) -> Option<&'a RecommendationItem> {
    if items.is_empty() || shown.len() >= items.len() {
        return None;
    }

    let mut candidates: Vec<&RecommendationItem> = items
        .iter()
        .filter(|item| !shown.contains(&item.name))
        .collect();
    if candidates.is_empty() {
        candidates = items.iter().collect();
    }

    let picked = if rng.gen_bool(1.0 - EXPLORATION_RATE) {
        let total: f64 = candidates.iter().map(|item| item.weight()).sum();
        let draw = rng.gen_range(0.0..total);
        pick_weighted(&candidates, draw)
    } else {
        candidates.choose(rng).copied()
    };
    let chosen = picked?;

    shown.insert(chosen.name.clone());
    Some(chosen)
}

/// First candidate whose cumulative weight reaches `draw`
fn pick_weighted<'a>(
    candidates: &[&'a RecommendationItem],
    draw: f64,
) -> Option<&'a RecommendationItem> {
    let mut cumulative = 0.0;
    for item in candidates {
        cumulative += item.weight();
        if cumulative >= draw {
            return Some(*item);
        }
    }
    // Float rounding can leave the draw just above the final sum
    candidates.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn items() -> Vec<RecommendationItem> {
        vec![
            RecommendationItem::new("반팔", 3, 0),
            RecommendationItem::new("린넨 셔츠", 0, 2),
            RecommendationItem::new("반바지", 1, 1),
        ]
    }

    #[test]
    fn test_empty_items() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut shown = HashSet::new();

        assert!(select_next(&[], &mut shown, &mut rng).is_none());
        assert!(shown.is_empty());
    }

    #[test]
    fn test_no_repeats_until_exhausted() {
        let items = items();
        let mut rng = StdRng::seed_from_u64(7);
        let mut shown = HashSet::new();

        let mut picked = HashSet::new();
        for _ in 0..items.len() {
            let item = select_next(&items, &mut shown, &mut rng).unwrap();
            assert!(picked.insert(item.name.clone()), "repeated {}", item.name);
        }

        assert_eq!(shown.len(), 3);
        assert!(select_next(&items, &mut shown, &mut rng).is_none());
    }

    #[test]
    fn test_duplicate_names_fall_back_to_full_list() {
        let items = vec![
            RecommendationItem::new("국밥", 0, 0),
            RecommendationItem::new("국밥", 5, 0),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let mut shown = HashSet::from(["국밥".to_string()]);

        let item = select_next(&items, &mut shown, &mut rng).unwrap();

        assert_eq!(item.name, "국밥");
        assert_eq!(shown.len(), 1);
    }

    #[test]
    fn test_popular_items_dominate() {
        let items = vec![
            RecommendationItem::new("패딩", 99, 0),
            RecommendationItem::new("바람막이", 0, 0),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        let popular = (0..1000)
            .filter(|_| {
                let mut shown = HashSet::new();
                select_next(&items, &mut shown, &mut rng).map(|i| i.name.as_str()) == Some("패딩")
            })
            .count();

        assert!(popular > 850, "popular picked {} times", popular);
    }

    #[test]
    fn test_pick_weighted_walks_cumulative_weights() {
        let a = RecommendationItem::new("a", 0, 0);
        let b = RecommendationItem::new("b", 1, 0);
        let c = RecommendationItem::new("c", 0, 0);
        let candidates = vec![&a, &b, &c];

        assert_eq!(pick_weighted(&candidates, 0.5).unwrap().name, "a");
        assert_eq!(pick_weighted(&candidates, 1.0).unwrap().name, "a");
        assert_eq!(pick_weighted(&candidates, 1.01).unwrap().name, "b");
        assert_eq!(pick_weighted(&candidates, 3.5).unwrap().name, "c");
    }
}
