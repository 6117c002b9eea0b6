//! IP geolocation, used by clients to preselect the caller's region.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/location` | Province and city of the caller |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod routes;

pub use clients::GeolocationClient;
