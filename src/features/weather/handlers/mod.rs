mod refresh_handler;

pub use refresh_handler::*;
