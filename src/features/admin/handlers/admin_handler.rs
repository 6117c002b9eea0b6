use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::admin::dtos::TestDataResultDto;
use crate::features::admin::services::AdminService;
use crate::shared::types::ApiResponse;

/// Fill every region with random votes
#[utoipa::path(
    post,
    path = "/api/admin/test-data",
    responses(
        (status = 200, description = "Regions updated", body = ApiResponse<TestDataResultDto>),
        (status = 403, description = "Test data generation is disabled")
    ),
    tag = "admin"
)]
pub async fn generate_test_data(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<TestDataResultDto>>> {
    let updated_regions = service.generate_test_data().await?;

    Ok(Json(ApiResponse::success(
        Some(TestDataResultDto { updated_regions }),
        None,
        None,
    )))
}
