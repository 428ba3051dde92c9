//! Drives a parsed script through a running coordinator.

use std::io::Write;

use huddle_common::{HuddleError, Result};
use huddle_stage::{PresentationCoordinator, SessionContext, StageConfig, StageEvent};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::script::ScriptStep;

/// Feed `steps` to a fresh coordinator and write every emitted stage event
/// to `out` as one JSON line. Returns the number of events written.
///
/// The session is ended once the script is exhausted, so the output always
/// closes with `SessionEnded`.
pub async fn replay<W: Write>(
    steps: Vec<ScriptStep>,
    context: SessionContext,
    config: StageConfig,
    out: &mut W,
) -> Result<usize> {
    let (coordinator, mut stage_rx) = PresentationCoordinator::new(context, config);
    let (event_tx, event_rx) = mpsc::channel(64);

    tokio::spawn(async move {
        coordinator.run(event_rx).await;
    });

    let feeder = tokio::spawn(async move {
        for step in steps {
            match step {
                ScriptStep::Pause { pause_ms } => {
                    debug!(pause_ms, "pausing");
                    tokio::time::sleep(std::time::Duration::from_millis(pause_ms)).await;
                }
                ScriptStep::Event(event) => {
                    if event_tx.send(event).await.is_err() {
                        return Err(HuddleError::Other("coordinator stopped early".into()));
                    }
                }
            }
        }
        Ok(())
    });

    let mut written = 0;
    while let Some(event) = stage_rx.recv().await {
        write_event(out, &event)?;
        written += 1;
    }

    feeder
        .await
        .map_err(|e| HuddleError::Other(format!("script feeder failed: {e}")))??;

    info!(events = written, "replay finished");
    Ok(written)
}

fn write_event<W: Write>(out: &mut W, event: &StageEvent) -> Result<()> {
    let line = serde_json::to_string(event)
        .map_err(|e| HuddleError::Other(format!("failed to serialize stage event: {e}")))?;
    writeln!(out, "{line}")?;
    Ok(())
}
