mod refresh_dto;

pub use refresh_dto::*;
