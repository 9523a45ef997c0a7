use std::sync::Once;

use metrics::{Unit, describe_counter};

static REGISTER_METRICS: Once = Once::new();

pub const KMM_INVALID_MODELS_DROPPED_TOTAL: &str = "kmm_invalid_models_dropped_total";
pub const ENDPOINT: &str = "endpoint";

/// Registers the metrics emitted by the API.
///
/// Safe to call multiple times; descriptions are registered only once.
pub fn register_metrics() {
    REGISTER_METRICS.call_once(|| {
        describe_counter!(
            KMM_INVALID_MODELS_DROPPED_TOTAL,
            Unit::Count,
            "Total number of Model objects returned by the cluster that failed validation and were left out of a listing"
        );
    });
}
