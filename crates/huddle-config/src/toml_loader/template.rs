//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Huddle Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[session]
# Keep participants that left in the roster, shown as inactive.
retain_left_participants = false
# Ask the host to hang up once the last remote participant leaves.
telecom = false
appear_maximized = true

[timing]
session_start_delay_ms = 1000   # 0-10000

[spatial]
enabled = true
distance = 0.2                  # 0.01-1.0

[display]
speaker_content_fill = true

[labels]
waiting = "Calling..."
"##
}
