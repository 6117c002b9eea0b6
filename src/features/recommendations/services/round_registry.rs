use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::features::recommendations::models::Category;

#[derive(Debug, Default)]
struct Round {
    clothes: HashSet<String>,
    food: HashSet<String>,
}

impl Round {
    fn shown_mut(&mut self, category: Category) -> &mut HashSet<String> {
        match category {
            Category::Clothes => &mut self.clothes,
            Category::Food => &mut self.food,
        }
    }
}

/// Names already offered, per client round and category.
///
/// A round untouched for longer than the TTL is dropped and starts over.
pub struct RoundRegistry {
    ttl: Duration,
    rounds: Mutex<HashMap<String, (Instant, Round)>>,
}

impl RoundRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            rounds: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `f` with the shown set of `round_id` for `category`
    pub fn with_shown<T>(
        &self,
        round_id: &str,
        category: Category,
        f: impl FnOnce(&mut HashSet<String>) -> T,
    ) -> T {
        self.with_shown_at(Instant::now(), round_id, category, f)
    }

    fn with_shown_at<T>(
        &self,
        now: Instant,
        round_id: &str,
        category: Category,
        f: impl FnOnce(&mut HashSet<String>) -> T,
    ) -> T {
        let mut rounds = self.rounds.lock().unwrap_or_else(|e| e.into_inner());

        let ttl = self.ttl;
        rounds.retain(|_, (touched_at, _)| now.saturating_duration_since(*touched_at) <= ttl);

        let (touched_at, round) = rounds
            .entry(round_id.to_string())
            .or_insert_with(|| (now, Round::default()));
        *touched_at = now;

        f(round.shown_mut(category))
    }

    /// Forgets a round. Returns false when it did not exist.
    pub fn reset(&self, round_id: &str) -> bool {
        self.rounds
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(round_id)
            .is_some()
    }

    #[cfg(test)]
    pub fn active_rounds(&self) -> usize {
        self.rounds.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
