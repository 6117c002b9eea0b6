use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;

use crate::core::error::{AppError, Result};
use crate::features::recommendations::models::{
    feeling_document_key, Category, RecommendationDocument, RecommendationItem,
};
use crate::features::recommendations::services::sampler::select_next;
use crate::features::recommendations::services::RoundRegistry;
use crate::features::recommendations::RecommendationRepository;
use crate::shared::constants::DEFAULT_ROUND_ID;
use crate::shared::validation::ROUND_ID_REGEX;

pub struct RecommendationService {
    repository: Arc<dyn RecommendationRepository>,
    rounds: RoundRegistry,
    rng: Mutex<StdRng>,
}

impl RecommendationService {
    pub fn new(
        repository: Arc<dyn RecommendationRepository>,
        round_ttl: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            repository,
            rounds: RoundRegistry::new(round_ttl),
            rng: Mutex::new(rng),
        }
    }

    /// Full clothes and food lists of a feeling
    pub async fn get_document(&self, feeling: &str) -> Result<RecommendationDocument> {
        let key = feeling_document_key(feeling);
        let document = self.repository.find_document(&key).await?;

        if document.is_empty() {
            return Err(AppError::NotFound(format!(
                "No recommendations for '{}'",
                feeling
            )));
        }

        Ok(document)
    }

    /// Offers the next item of a category within a round, or `None` once
    /// every item was offered. The offered item's `shown_count` is bumped.
    pub async fn next_item(
        &self,
        feeling: &str,
        category: Category,
        round_id: Option<&str>,
    ) -> Result<Option<RecommendationItem>> {
        let round_id = round_id.unwrap_or(DEFAULT_ROUND_ID);
        if !ROUND_ID_REGEX.is_match(round_id) {
            return Err(AppError::Validation(format!(
                "Invalid round id '{}'",
                round_id
            )));
        }

        let document = self.get_document(feeling).await?;
        let items = document.items(category);

        let chosen = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            self.rounds.with_shown(round_id, category, |shown| {
                select_next(items, shown, &mut *rng).cloned()
            })
        };

        let Some(item) = chosen else {
            tracing::debug!("Round {} exhausted {} for {}", round_id, category, feeling);
            return Ok(None);
        };

        let key = feeling_document_key(feeling);
        let bumped = self.repository.increment_shown(&key, &item.name).await?;
        tracing::debug!(
            "Offered {} '{}' in round {} ({} counters bumped)",
            category,
            item.name,
            round_id,
            bumped
        );

        Ok(Some(item))
    }

    pub async fn like(&self, feeling: &str, category: Category, name: &str) -> Result<()> {
        let key = feeling_document_key(feeling);
        let updated = self
            .repository
            .increment_likes(&key, category, name)
            .await?;

        if !updated {
            return Err(AppError::NotFound(format!(
                "Recommendation '{}' not found in {} of '{}'",
                name, category, feeling
            )));
        }

        Ok(())
    }

    /// Starts a round over. Returns false when the round was unknown.
    pub fn reset_round(&self, round_id: &str) -> bool {
        self.rounds.reset(round_id)
    }
}
