use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::error::{AppError, Result};
use crate::features::regions::RegionService;

/// Service for operator-only actions
pub struct AdminService {
    regions: Arc<RegionService>,
    test_data_enabled: bool,
}

impl AdminService {
    pub fn new(regions: Arc<RegionService>, test_data_enabled: bool) -> Self {
        Self {
            regions,
            test_data_enabled,
        }
    }

    /// Overwrites all vote counters with random data. Destructive.
    pub async fn generate_test_data(&self) -> Result<usize> {
        if !self.test_data_enabled {
            return Err(AppError::Forbidden(
                "Test data generation is disabled".to_string(),
            ));
        }

        tracing::warn!("Overwriting every region's votes with random test data");
        let mut rng = StdRng::from_entropy();
        self.regions.generate_test_data(&mut rng).await
    }
}
