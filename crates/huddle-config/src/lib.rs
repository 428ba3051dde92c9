//! Huddle configuration system.
//!
//! Provides TOML-based configuration for the session stage: participant
//! retention, session-start timing, spatial audio and display defaults.
//! All sections use sensible defaults so partial configs work out of
//! the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use huddle_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HuddleConfig, CONFIG_SCHEMA_VERSION};

use huddle_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<HuddleConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &HuddleConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = HuddleConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"session\""));
        assert!(json.contains("\"timing\""));
        assert!(json.contains("\"spatial\""));
        assert!(json.contains("\"display\""));
        assert!(json.contains("\"labels\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = HuddleConfig::default();
        let json = config_to_json(&config);
        let parsed: HuddleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timing.session_start_delay_ms, 1000);
        assert_eq!(parsed.labels.waiting, "Calling...");
        assert!(!parsed.session.retain_left_participants);
    }
}
