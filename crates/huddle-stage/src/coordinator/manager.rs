//! Presentation coordinator: lifecycle handling and state recomputation.

use huddle_common::ParticipantId;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::lock::{LockTransition, ScreenShareLock};
use crate::participant::{MediaDescriptor, ParticipantPatch};
use crate::presentation::{self, DisplayMode, PresentationInputs, PresentationState};
use crate::registry::{DeparturePolicy, ParticipantRegistry};
use crate::spatial::{SpatialAssignment, SpatialAudioPositioner};
use crate::timer::{ActiveSpeakerMode, ActiveSpeakerSignal, ActiveSpeakerTimer, TimerTick};

use super::types::{SessionContext, SessionEvent, StageConfig, StageEvent};

// ---------------------------------------------------------------------------
// Presentation Coordinator
// ---------------------------------------------------------------------------

/// Owns the participant registry, the screen-share lock and the timers for
/// one session, and publishes the derived presentation on a channel.
///
/// All mutation happens through `&mut self`, one event at a time.
pub struct PresentationCoordinator {
    config: StageConfig,
    context: SessionContext,
    registry: ParticipantRegistry,
    lock: ScreenShareLock,
    timer: ActiveSpeakerTimer,
    speaker: ActiveSpeakerMode,
    positioner: SpatialAudioPositioner,
    /// Current speaker view mode; saved into the lock while a share runs.
    display_mode: DisplayMode,
    minimized: bool,
    /// A remote participant was present since the last hang-up request.
    had_remote: bool,
    state: PresentationState,
    spatial: SpatialAssignment,
    /// Ordered ids behind `spatial`, to detect membership or order changes.
    spatial_order: Vec<ParticipantId>,
    event_tx: mpsc::UnboundedSender<StageEvent>,
    tick_rx: mpsc::UnboundedReceiver<TimerTick>,
}

impl PresentationCoordinator {
    pub fn new(
        context: SessionContext,
        config: StageConfig,
    ) -> (Self, mpsc::UnboundedReceiver<StageEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();

        let registry = ParticipantRegistry::new(context.local_participant.clone());
        let lock = ScreenShareLock::default();
        let display_mode = DisplayMode::from_content_fill(config.speaker_content_fill);
        let minimized = !config.appear_maximized;
        let state = presentation::derive(&PresentationInputs {
            registry: &registry,
            lock: &lock,
            display_mode,
            minimized,
            waiting_label: &config.waiting_label,
            previous_label: None,
        });

        let coordinator = Self {
            timer: ActiveSpeakerTimer::new(config.session_start_delay, tick_tx),
            speaker: ActiveSpeakerMode::default(),
            positioner: SpatialAudioPositioner::new(config.spatial_distance),
            config,
            context,
            registry,
            lock,
            display_mode,
            minimized,
            had_remote: false,
            state,
            spatial: SpatialAssignment::default(),
            spatial_order: Vec::new(),
            event_tx,
            tick_rx,
        };
        (coordinator, event_rx)
    }

    // -- Accessors ----------------------------------------------------------

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn spatial(&self) -> &SpatialAssignment {
        &self.spatial
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn lock(&self) -> &ScreenShareLock {
        &self.lock
    }

    pub fn timer(&self) -> &ActiveSpeakerTimer {
        &self.timer
    }

    pub fn active_speaker(&self) -> &ActiveSpeakerMode {
        &self.speaker
    }

    // -- Event loop ---------------------------------------------------------

    /// Process inbound events and timer ticks serially until the sender is
    /// dropped, then end the session. Returns the coordinator for inspection.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> Self {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => {
                        self.end_session();
                        break;
                    }
                },
                Some(tick) = self.tick_rx.recv() => self.on_timer_tick(tick),
            }
        }
        self
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ParticipantJoined { participant, media } => {
                self.participant_joined(&participant, media)
            }
            SessionEvent::ParticipantUpdated { participant, media } => {
                self.participant_updated(&participant, media)
            }
            SessionEvent::ParticipantLeft { participant } => self.participant_left(&participant),
            SessionEvent::ScreenShareStarted { participant, media } => {
                self.screen_share_started(&participant, media)
            }
            SessionEvent::ScreenShareStopped { participant } => {
                self.screen_share_stopped(&participant)
            }
            SessionEvent::SessionEnded => self.end_session(),
        }
    }

    /// Deliver a tick from the session start timer.
    pub fn on_timer_tick(&mut self, tick: TimerTick) {
        if self.timer.on_tick(tick) {
            info!(session = %self.context.session_id, "session started");
            self.emit(StageEvent::SessionStarted);
        }
    }

    // -- Lifecycle ----------------------------------------------------------

    pub fn participant_joined(&mut self, id: &ParticipantId, media: MediaDescriptor) {
        let local = self.registry.is_local(id);
        self.registry.upsert(id, media.camera_patch());
        info!(participant = %id, local, video = media.has_video(), "participant joined");

        if !local {
            self.timer.arm();
            self.had_remote = true;
            // Suspended while a screen share holds the stage.
            if !self.lock.is_locked() {
                let signal = self.speaker.begin();
                self.emit_speaker(signal);
            }
            let signal = self.speaker.refresh();
            self.emit_speaker(signal);
        }

        self.recompute();
    }

    pub fn participant_updated(&mut self, id: &ParticipantId, media: MediaDescriptor) {
        if let Err(e) = self.registry.update(id, media.camera_patch()) {
            warn!(participant = %id, "ignoring update: {e}");
            return;
        }
        debug!(participant = %id, video = media.has_video(), "participant updated");

        if !self.registry.is_local(id) {
            let signal = self.speaker.refresh();
            self.emit_speaker(signal);
        }
        self.recompute();
    }

    pub fn participant_left(&mut self, id: &ParticipantId) {
        if self.registry.is_local(id) {
            debug!(participant = %id, "ignoring local leave");
            return;
        }
        if let Err(e) = self.registry.ensure_active(id) {
            warn!(participant = %id, "ignoring leave: {e}");
            return;
        }

        // A presenter leaving releases the screen share implicitly.
        let released = if self.lock.is_held_by(id) {
            self.lock.release(id).ok().flatten()
        } else {
            None
        };

        let policy = DeparturePolicy::from_retain(self.config.retain_left_participants);
        self.registry.depart(id, policy);
        info!(participant = %id, ?policy, "participant left");

        if let Some(mode) = released {
            info!(participant = %id, "presenter left, screen share released");
            self.display_mode = mode;
        }

        if self.registry.is_empty() {
            self.timer.cancel();
            let signal = self.speaker.end();
            self.emit_speaker(signal);
            if self.config.telecom && self.had_remote {
                info!("last remote participant left, requesting hang-up");
                self.had_remote = false;
                self.emit(StageEvent::HangUpRequested);
            }
        } else {
            if released.is_some() {
                let signal = self.speaker.begin();
                self.emit_speaker(signal);
            }
            let signal = self.speaker.refresh();
            self.emit_speaker(signal);
        }

        self.recompute();
    }

    pub fn screen_share_started(&mut self, id: &ParticipantId, media: MediaDescriptor) {
        if self.registry.is_local(id) {
            debug!(participant = %id, "ignoring local screen share");
            return;
        }
        if !media.has_video() {
            debug!(participant = %id, "ignoring screen share without a video track");
            return;
        }
        if let Err(e) = self.registry.ensure_active(id) {
            warn!(participant = %id, "ignoring screen share start: {e}");
            return;
        }

        match self.lock.acquire(id, self.display_mode) {
            Ok(LockTransition::Acquired) => {
                info!(participant = %id, "screen share started, stage locked");
                let signal = self.speaker.end();
                self.emit_speaker(signal);
                self.display_mode = DisplayMode::Fit;
            }
            Ok(LockTransition::AlreadyHeld) => {
                debug!(participant = %id, "screen share already locked to presenter");
            }
            Err(e) => {
                warn!(participant = %id, "rejecting screen share: {e}");
                return;
            }
        }

        if let Err(e) = self
            .registry
            .update(id, ParticipantPatch::screen_share(true))
        {
            warn!(participant = %id, "screen share presenter vanished: {e}");
        }
        self.recompute();
    }

    pub fn screen_share_stopped(&mut self, id: &ParticipantId) {
        if self.registry.is_local(id) {
            debug!(participant = %id, "ignoring local screen share stop");
            return;
        }

        match self.lock.release(id) {
            Ok(Some(mode)) => {
                info!(participant = %id, "screen share stopped, stage unlocked");
                self.display_mode = mode;
                let signal = self.speaker.begin();
                self.emit_speaker(signal);
                let signal = self.speaker.refresh();
                self.emit_speaker(signal);
            }
            Ok(None) => {
                debug!(participant = %id, "screen share stopped without a lock");
            }
            Err(e) => {
                warn!(participant = %id, "ignoring screen share stop: {e}");
                return;
            }
        }

        if let Err(e) = self
            .registry
            .update(id, ParticipantPatch::screen_share(false))
        {
            warn!(participant = %id, "ignoring screen share stop: {e}");
        }
        self.recompute();
    }

    /// Show or hide the session view; a minimized view never shows the
    /// local preview.
    pub fn set_minimized(&mut self, minimized: bool) {
        if self.minimized == minimized {
            return;
        }
        self.minimized = minimized;
        self.recompute();
    }

    /// Tear the session down: timer, then lock, then registry, so a late
    /// tick cannot resurrect stale state.
    pub fn end_session(&mut self) {
        self.timer.reset();
        self.lock.clear();
        self.registry.clear();

        let signal = self.speaker.end();
        self.emit_speaker(signal);
        self.display_mode = DisplayMode::from_content_fill(self.config.speaker_content_fill);
        self.had_remote = false;
        self.recompute();

        info!(session = %self.context.session_id, "session ended");
        self.emit(StageEvent::SessionEnded);
    }

    // -- Derived state ------------------------------------------------------

    fn recompute(&mut self) {
        let state = presentation::derive(&PresentationInputs {
            registry: &self.registry,
            lock: &self.lock,
            display_mode: self.display_mode,
            minimized: self.minimized,
            waiting_label: &self.config.waiting_label,
            previous_label: self.state.state_label.as_deref(),
        });

        if state != self.state {
            debug!(
                full_screen = ?state.full_screen_target,
                local_preview = state.local_preview_visible,
                waiting = state.state_label.is_some(),
                "presentation changed"
            );
            self.state = state.clone();
            self.emit(StageEvent::PresentationChanged(state));
        }

        if self.config.spatial_audio {
            self.refresh_spatial();
        }
    }

    fn refresh_spatial(&mut self) {
        let active = self.registry.active_with_media();
        let order: Vec<ParticipantId> = active.iter().map(|p| p.id.clone()).collect();
        if order == self.spatial_order {
            return;
        }

        self.spatial = self.positioner.positions(&active);
        self.spatial_order = order;
        debug!(participants = self.spatial.len(), "spatial audio recomputed");
        self.emit(StageEvent::SpatialAudioChanged(self.spatial.clone()));
    }

    fn emit_speaker(&self, signal: Option<ActiveSpeakerSignal>) {
        if let Some(signal) = signal {
            self.emit(StageEvent::ActiveSpeakerChanged(signal));
        }
    }

    fn emit(&self, event: StageEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("no receiver for stage event");
        }
    }
}
