mod recommendation_service;
mod round_registry;
pub mod sampler;

pub use recommendation_service::RecommendationService;
pub use round_registry::RoundRegistry;
