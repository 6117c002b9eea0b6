mod category;
mod item;

pub use category::Category;
pub use item::{feeling_document_key, RecommendationDocument, RecommendationItem};
