use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters of the next-item request
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NextItemQuery {
    /// `clothes` or `food`
    #[param(example = "clothes")]
    pub category: String,
    /// Client round id; a shared default round when omitted
    pub round: Option<String>,
}

/// Request DTO for liking a recommendation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequestDto {
    #[validate(length(min = 1, message = "Feeling is required"))]
    pub feeling: String,

    /// `clothes` or `food`
    pub category: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundResetDto {
    /// False when the round was unknown or already expired
    pub reset: bool,
}
