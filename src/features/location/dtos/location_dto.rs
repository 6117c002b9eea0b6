use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::location::clients::Location;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LocationQuery {
    /// Address to resolve instead of the caller's
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocationDto {
    #[schema(example = "경기도")]
    pub province: String,
    #[schema(example = "성남시")]
    pub city: String,
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            province: location.province,
            city: location.city,
        }
    }
}
