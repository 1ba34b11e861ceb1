use std::sync::Arc;

use jiff::{civil::date, tz::TimeZone};
use studydesk_core::{FixedClock, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Builder with a temporary database and a clock frozen at
/// 2026-10-21 18:45 UTC, a Wednesday.
pub fn test_builder(temp_dir: &TempDir) -> PlannerBuilder {
    let now = date(2026, 10, 21)
        .at(18, 45, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("valid test time");
    PlannerBuilder::new()
        .with_database_path(temp_dir.path().join("test.db"))
        .with_clock(Arc::new(FixedClock(now)))
}

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = test_builder(&temp_dir)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
