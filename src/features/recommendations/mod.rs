//! Clothing and food recommendations per feeling.
//!
//! Items are offered one at a time with popularity-weighted sampling and
//! never repeat inside a client round until the category is exhausted.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/recommendations/{feeling}` | Both lists of a feeling |
//! | GET | `/api/recommendations/{feeling}/next` | Next item of a round |
//! | DELETE | `/api/recommendations/rounds/{round}` | Reset a round |
//! | POST | `/api/recommendations/like` | Like an item |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgRecommendationRepository, RecommendationRepository};
pub use services::RecommendationService;
