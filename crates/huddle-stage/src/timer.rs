//! Session-start debounce timer and the active-speaker mode controller.
//!
//! The timer delays the "session started" signal after the first remote
//! join so the UI does not flicker while media is still negotiating. It
//! runs as a one-shot tokio task that reports back through a channel; the
//! coordinator consumes the tick on its own serial loop.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delivered by the timer task when its delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Armed,
}

pub struct ActiveSpeakerTimer {
    delay: Duration,
    /// Bumped on every arm and cancel; ticks from older windows are stale.
    generation: u64,
    pending: Option<JoinHandle<()>>,
    /// The signal was already delivered this session.
    fired: bool,
    tick_tx: mpsc::UnboundedSender<TimerTick>,
}

impl ActiveSpeakerTimer {
    pub fn new(delay: Duration, tick_tx: mpsc::UnboundedSender<TimerTick>) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
            fired: false,
            tick_tx,
        }
    }

    pub fn state(&self) -> TimerState {
        if self.pending.is_some() {
            TimerState::Armed
        } else {
            TimerState::Idle
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state() == TimerState::Armed
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Idle -> Armed. Returns false if already armed or already fired.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) -> bool {
        if self.pending.is_some() || self.fired {
            return false;
        }

        self.generation += 1;
        let tick = TimerTick {
            generation: self.generation,
        };
        let delay = self.delay;
        let tick_tx = self.tick_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tick_tx.send(tick);
        }));

        debug!(delay_ms = delay.as_millis() as u64, "session start timer armed");
        true
    }

    /// Armed -> Idle without firing. Returns false if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                self.generation += 1;
                debug!("session start timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Consume a tick. Returns true exactly when it closes the current
    /// armed window, meaning the caller should emit the signal.
    pub fn on_tick(&mut self, tick: TimerTick) -> bool {
        if self.pending.is_none() || tick.generation != self.generation {
            debug!(
                tick = tick.generation,
                current = self.generation,
                "ignoring stale session start tick"
            );
            return false;
        }
        self.pending = None;
        self.fired = true;
        true
    }

    /// Cancel and forget that the signal fired, for a fresh session.
    pub fn reset(&mut self) {
        self.cancel();
        self.fired = false;
    }
}

impl Drop for ActiveSpeakerTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Active speaker mode
// ---------------------------------------------------------------------------

/// Emitted to the UI as the active-speaker mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveSpeakerSignal {
    Began,
    Refreshed,
    Ended,
}

/// Fallback presentation mode used while no screen share is locked.
#[derive(Debug, Default)]
pub struct ActiveSpeakerMode {
    active: bool,
}

impl ActiveSpeakerMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn begin(&mut self) -> Option<ActiveSpeakerSignal> {
        if self.active {
            return None;
        }
        self.active = true;
        Some(ActiveSpeakerSignal::Began)
    }

    /// Re-emit without touching any state. No-op while inactive.
    pub fn refresh(&self) -> Option<ActiveSpeakerSignal> {
        self.active.then_some(ActiveSpeakerSignal::Refreshed)
    }

    pub fn end(&mut self) -> Option<ActiveSpeakerSignal> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(ActiveSpeakerSignal::Ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(delay_ms: u64) -> (ActiveSpeakerTimer, mpsc::UnboundedReceiver<TimerTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ActiveSpeakerTimer::new(Duration::from_millis(delay_ms), tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let (mut timer, mut rx) = timer(1000);
        assert!(timer.arm());
        assert!(timer.is_armed());
        assert!(!timer.arm());

        let tick = rx.recv().await.unwrap();
        assert!(timer.on_tick(tick));
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(timer.has_fired());

        // Already fired this session.
        assert!(!timer.arm());
        assert!(!timer.on_tick(tick));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_before_delay() {
        let (mut timer, mut rx) = timer(1000);
        timer.arm();
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_tick() {
        let (mut timer, mut rx) = timer(1000);
        timer.arm();
        assert!(timer.cancel());
        assert!(!timer.cancel());
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());
        assert!(!timer.has_fired());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_tick_after_rearm_is_ignored() {
        let (mut timer, mut rx) = timer(1000);
        timer.arm();
        let stale = rx.recv().await.unwrap();

        // The window was cancelled after the task already sent its tick.
        timer.cancel();
        timer.arm();
        assert!(!timer.on_tick(stale));
        assert!(timer.is_armed());

        let fresh = rx.recv().await.unwrap();
        assert!(timer.on_tick(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_allows_a_new_session() {
        let (mut timer, mut rx) = timer(10);
        timer.arm();
        let tick = rx.recv().await.unwrap();
        assert!(timer.on_tick(tick));

        timer.reset();
        assert!(!timer.has_fired());
        assert!(timer.arm());
    }

    #[test]
    fn speaker_mode_transitions() {
        let mut mode = ActiveSpeakerMode::default();
        assert_eq!(mode.refresh(), None);
        assert_eq!(mode.end(), None);

        assert_eq!(mode.begin(), Some(ActiveSpeakerSignal::Began));
        assert_eq!(mode.begin(), None);
        assert_eq!(mode.refresh(), Some(ActiveSpeakerSignal::Refreshed));
        assert!(mode.is_active());

        assert_eq!(mode.end(), Some(ActiveSpeakerSignal::Ended));
        assert!(!mode.is_active());
    }
}
