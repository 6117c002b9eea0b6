use serde::Serialize;
use utoipa::ToSchema;

/// Counts of a refresh pass. Failures are isolated per region, so a pass
/// with `failed > 0` still completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub updated: usize,
    pub failed: usize,
    /// Regions without an observation station
    pub skipped: usize,
}

impl RefreshReport {
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cached readings are recent or another refresh is running
    Skipped,
    Completed(RefreshReport),
}

impl RefreshOutcome {
    pub fn updated(&self) -> usize {
        match self {
            RefreshOutcome::Skipped => 0,
            RefreshOutcome::Completed(report) => report.updated,
        }
    }
}
