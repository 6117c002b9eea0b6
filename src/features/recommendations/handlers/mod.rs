mod recommendation_handler;

pub use recommendation_handler::*;
