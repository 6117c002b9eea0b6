//! Operator tooling. Disabled unless `ENABLE_TEST_DATA` is set.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/admin/test-data` | Fill every region with random votes |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
