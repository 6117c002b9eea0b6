mod refresh_marker;
mod refresh_report;

pub use refresh_marker::{RefreshMarker, RefreshStatus};
pub use refresh_report::{RefreshOutcome, RefreshReport};
