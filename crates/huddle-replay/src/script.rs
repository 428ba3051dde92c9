//! JSON-lines replay scripts.
//!
//! Each non-blank line is either a session event in its tagged form, e.g.
//! `{"type":"ParticipantLeft","data":{"participant":"alice"}}`, or a pause
//! step `{"pause_ms": 250}`. Lines starting with `#` are comments.

use std::time::Duration;

use huddle_common::{HuddleError, Result};
use huddle_stage::SessionEvent;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Pause { pause_ms: u64 },
    Event(SessionEvent),
}

impl ScriptStep {
    pub fn pause(&self) -> Option<Duration> {
        match self {
            Self::Pause { pause_ms } => Some(Duration::from_millis(*pause_ms)),
            Self::Event(_) => None,
        }
    }
}

pub fn parse_script(input: &str) -> Result<Vec<ScriptStep>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line.trim())
                .map_err(|e| HuddleError::Script(format!("line {}: {e}", index + 1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_stage::MediaDescriptor;

    #[test]
    fn parses_events_and_pauses() {
        let script = r#"
# two people join
{"type":"ParticipantJoined","data":{"participant":"alice","media":{"video_tracks":1}}}
{"pause_ms": 1200}
{"type":"ParticipantLeft","data":{"participant":"alice"}}
{"type":"SessionEnded"}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[0],
            ScriptStep::Event(SessionEvent::ParticipantJoined {
                participant: "alice".into(),
                media: MediaDescriptor {
                    video_tracks: 1,
                    audio_tracks: 0,
                },
            })
        );
        assert_eq!(steps[1].pause(), Some(Duration::from_millis(1200)));
        assert_eq!(steps[3], ScriptStep::Event(SessionEvent::SessionEnded));
    }

    #[test]
    fn media_defaults_to_none() {
        let steps =
            parse_script(r#"{"type":"ParticipantJoined","data":{"participant":"bob"}}"#).unwrap();
        let ScriptStep::Event(SessionEvent::ParticipantJoined { media, .. }) = &steps[0] else {
            panic!("expected a join, got {:?}", steps[0]);
        };
        assert!(!media.has_video());
    }

    #[test]
    fn reports_offending_line() {
        let script = "{\"pause_ms\": 5}\n\n{\"type\":\"Dance\"}\n";
        let err = parse_script(script).unwrap_err();
        assert!(matches!(err, HuddleError::Script(_)));
        assert!(err.to_string().starts_with("script error: line 3:"));
    }
}
