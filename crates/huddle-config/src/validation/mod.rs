//! Full configuration validation.
//!
//! Validates numeric ranges and required texts. Each section has its own
//! validator; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::HuddleConfig;
use huddle_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HuddleConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_timing(&mut errors, config);
    sections::validate_spatial(&mut errors, config);
    sections::validate_labels(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
