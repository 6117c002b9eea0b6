use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::recommendations::dtos::{LikeRequestDto, NextItemQuery, RoundResetDto};
use crate::features::recommendations::models::{
    Category, RecommendationDocument, RecommendationItem,
};
use crate::features::recommendations::services::RecommendationService;
use crate::shared::types::ApiResponse;

/// Get the clothes and food lists of a feeling
#[utoipa::path(
    get,
    path = "/api/recommendations/{feeling}",
    params(
        ("feeling" = String, Path, description = "hot, normal or cold")
    ),
    responses(
        (status = 200, description = "Recommendation lists", body = ApiResponse<RecommendationDocument>),
        (status = 404, description = "No recommendations for this feeling")
    ),
    tag = "recommendations"
)]
pub async fn get_recommendations(
    State(service): State<Arc<RecommendationService>>,
    Path(feeling): Path<String>,
) -> Result<Json<ApiResponse<RecommendationDocument>>> {
    let document = service.get_document(&feeling).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Get the next recommendation of a round
///
/// Returns no data once every item of the category was offered in the round.
#[utoipa::path(
    get,
    path = "/api/recommendations/{feeling}/next",
    params(
        ("feeling" = String, Path, description = "hot, normal or cold"),
        NextItemQuery
    ),
    responses(
        (status = 200, description = "Next item, or none when the round is exhausted", body = ApiResponse<RecommendationItem>),
        (status = 400, description = "Unknown category or invalid round id"),
        (status = 404, description = "No recommendations for this feeling")
    ),
    tag = "recommendations"
)]
pub async fn next_recommendation(
    State(service): State<Arc<RecommendationService>>,
    Path(feeling): Path<String>,
    Query(query): Query<NextItemQuery>,
) -> Result<Json<ApiResponse<RecommendationItem>>> {
    let category: Category = query.category.parse()?;

    let item = service
        .next_item(&feeling, category, query.round.as_deref())
        .await?;
    let message = item
        .is_none()
        .then(|| "Every item was offered in this round".to_string());

    Ok(Json(ApiResponse::success(item, message, None)))
}

/// Reset a recommendation round
#[utoipa::path(
    delete,
    path = "/api/recommendations/rounds/{round}",
    params(
        ("round" = String, Path, description = "Client round id")
    ),
    responses(
        (status = 200, description = "Round reset", body = ApiResponse<RoundResetDto>)
    ),
    tag = "recommendations"
)]
pub async fn reset_round(
    State(service): State<Arc<RecommendationService>>,
    Path(round): Path<String>,
) -> Result<Json<ApiResponse<RoundResetDto>>> {
    let reset = service.reset_round(&round);
    Ok(Json(ApiResponse::success(
        Some(RoundResetDto { reset }),
        None,
        None,
    )))
}

/// Like a recommendation
#[utoipa::path(
    post,
    path = "/api/recommendations/like",
    request_body = LikeRequestDto,
    responses(
        (status = 200, description = "Like recorded"),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "Recommendation not found")
    ),
    tag = "recommendations"
)]
pub async fn like_recommendation(
    State(service): State<Arc<RecommendationService>>,
    AppJson(dto): AppJson<LikeRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let category: Category = dto.category.parse()?;

    service.like(&dto.feeling, category, &dto.name).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Like recorded".to_string()),
        None,
    )))
}
