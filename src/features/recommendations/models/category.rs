use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;

/// Recommendation list of a feeling document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clothes,
    Food,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Category; 2] = [Category::Clothes, Category::Food];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothes => "clothes",
            Category::Food => "food",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothes" => Ok(Category::Clothes),
            "food" => Ok(Category::Food),
            other => Err(AppError::Validation(format!(
                "Unknown category '{}', expected clothes or food",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert!(matches!(
            "drinks".parse::<Category>(),
            Err(AppError::Validation(_))
        ));
    }
}
