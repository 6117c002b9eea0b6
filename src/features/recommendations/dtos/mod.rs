mod recommendation_dto;

pub use recommendation_dto::*;
