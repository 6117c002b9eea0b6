use serde::Serialize;
use utoipa::ToSchema;

use crate::features::recommendations::models::Category;
use crate::shared::constants::RECOMMENDATION_DOC_SUFFIX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub name: String,
    pub likes: i64,
    /// Times offered by the sampler; damps the item's weight
    pub shown_count: i64,
}

impl RecommendationItem {
    pub fn new(name: impl Into<String>, likes: i64, shown_count: i64) -> Self {
        Self {
            name: name.into(),
            likes,
            shown_count,
        }
    }

    /// Sampling weight `(likes + 1) / (shown_count + 1)`
    pub fn weight(&self) -> f64 {
        (self.likes.max(0) + 1) as f64 / (self.shown_count.max(0) + 1) as f64
    }
}

/// Both recommendation lists of one feeling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecommendationDocument {
    pub clothes: Vec<RecommendationItem>,
    pub food: Vec<RecommendationItem>,
}

impl RecommendationDocument {
    pub fn items(&self, category: Category) -> &[RecommendationItem] {
        match category {
            Category::Clothes => &self.clothes,
            Category::Food => &self.food,
        }
    }

    pub fn items_mut(&mut self, category: Category) -> &mut Vec<RecommendationItem> {
        match category {
            Category::Clothes => &mut self.clothes,
            Category::Food => &mut self.food,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clothes.is_empty() && self.food.is_empty()
    }
}

/// Key of the document holding a feeling's recommendations, e.g. `hot_추천`
pub fn feeling_document_key(feeling: &str) -> String {
    format!("{}{}", feeling, RECOMMENDATION_DOC_SUFFIX)
}
