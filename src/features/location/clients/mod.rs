mod geolocation_client;

pub use geolocation_client::{GeolocationClient, Location};
