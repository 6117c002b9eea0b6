//! Perceived temperature votes per administrative region.
//!
//! Votes are stored as per-region counters; every view (map, province
//! totals, ranking) is computed on demand from those counters.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/regions` | Region names of a province |
//! | GET | `/api/regions/info` | Dominant feeling and temperature of a region |
//! | GET | `/api/regions/stats` | Raw vote totals of a province |
//! | GET | `/api/regions/lookup` | Province containing a region |
//! | GET | `/api/regions/temperature` | Cached temperature of a region |
//! | POST | `/api/votes` | Submit a vote |
//! | GET | `/api/weather` | Map view (provinces or municipalities) |
//! | GET | `/api/ranking` | Vote and temperature ranking |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgRegionRepository, RegionRepository};
pub use services::RegionService;
