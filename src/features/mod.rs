pub mod admin;
pub mod location;
pub mod recommendations;
pub mod regions;
pub mod weather;
