//! Test utilities and module declarations for storage tests.

use sitepilot_core::{Impact, MetricMap, OptimizationSuggestion, StepData};
use tempfile::TempDir;

use crate::Storage;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn url_step(url: &str) -> StepData {
    StepData::Url { url: url.to_owned() }
}

pub fn test_suggestions() -> Vec<OptimizationSuggestion> {
    vec![OptimizationSuggestion {
        kind: "testing".to_owned(),
        title: "A/B Test Homepage Layout".to_owned(),
        description: "Test different layouts to optimize conversion rate".to_owned(),
        impact: Impact::High,
        implementation: "Set up A/B test variants for homepage components".to_owned(),
    }]
}

pub fn test_metrics() -> MetricMap {
    [("conversionRate".to_owned(), 95.0), ("retention".to_owned(), 94.0)].into_iter().collect()
}
