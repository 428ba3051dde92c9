//! Validation for the individual config sections.

use crate::schema::HuddleConfig;

use super::helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Validate timing constraints.
pub(crate) fn validate_timing(errors: &mut Vec<String>, config: &HuddleConfig) {
    validate_range(
        errors,
        "timing.session_start_delay_ms",
        config.timing.session_start_delay_ms,
        0,
        10_000,
    );
}

/// Validate spatial audio constraints.
pub(crate) fn validate_spatial(errors: &mut Vec<String>, config: &HuddleConfig) {
    validate_range_f64(
        errors,
        "spatial.distance",
        config.spatial.distance,
        0.01,
        1.0,
    );
}

/// Validate label texts.
pub(crate) fn validate_labels(errors: &mut Vec<String>, config: &HuddleConfig) {
    validate_non_empty(errors, "labels.waiting", &config.labels.waiting);
}
