use std::time::Instant;

use chrono::Utc;
use shared::domain::{Condition, Stimulus, TrialEvent, Viewport};
use thiserror::Error;
use tracing::warn;

use crate::session::SessionContext;

/// Monotonic time source for response-time measurement. Wall clocks can
/// move backwards across adjustments, so reaction times are never derived
/// from them.
pub trait Clock {
    type Timestamp: Copy;
    fn now(&self) -> Self::Timestamp;
    fn elapsed_ms(&self, since: Self::Timestamp) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Timestamp = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_ms(&self, since: Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

/// User-facing correctness acknowledgment, decoupled from scoring.
pub trait Notifier {
    fn acknowledge(&self, correct: bool);
}

/// Headless default: no feedback surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn acknowledge(&self, _correct: bool) {}
}

/// Snapshot of the participant's environment, consulted when the response
/// happens rather than cached at mount.
pub trait EnvironmentProbe {
    fn viewport(&self) -> Viewport;
    fn reduced_motion(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct FixedEnvironment {
    pub viewport: Viewport,
    pub reduced_motion: bool,
}

impl Default for FixedEnvironment {
    fn default() -> Self {
        Self {
            viewport: Viewport { w: 1280, h: 720 },
            reduced_motion: false,
        }
    }
}

impl EnvironmentProbe for FixedEnvironment {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialPhase {
    Idle,
    Presented,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrialError {
    #[error("no stimulus set is presented")]
    NotPresented,
    #[error("stimulus index {index} out of bounds for a set of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Drives one stimulus set presentation: records the mount time, scores
/// clicks against the currently visible set, and assembles trial events.
pub struct TrialController<C: Clock, N: Notifier, E: EnvironmentProbe> {
    session: SessionContext,
    clock: C,
    notifier: N,
    environment: E,
    stimuli: Vec<Stimulus>,
    presented_at: Option<C::Timestamp>,
    phase: TrialPhase,
}

impl<C: Clock, N: Notifier, E: EnvironmentProbe> TrialController<C, N, E> {
    pub fn new(session: SessionContext, clock: C, notifier: N, environment: E) -> Self {
        Self {
            session,
            clock,
            notifier,
            environment,
            stimuli: Vec::new(),
            presented_at: None,
            phase: TrialPhase::Idle,
        }
    }

    /// Mounts a stimulus set and records the response-time baseline.
    /// An empty set has no click targets, so the controller stays idle.
    pub fn present(&mut self, stimuli: Vec<Stimulus>) {
        if stimuli.is_empty() {
            warn!("empty stimulus set, nothing to present");
            self.stimuli = stimuli;
            self.presented_at = None;
            self.phase = TrialPhase::Idle;
            return;
        }
        self.stimuli = stimuli;
        self.presented_at = Some(self.clock.now());
        self.phase = TrialPhase::Presented;
    }

    /// Switching conditions only changes the presentation profile; the
    /// response-time baseline and scoring are untouched.
    pub fn set_condition(&mut self, condition: Condition) {
        self.session.condition = condition;
    }

    pub fn condition(&self) -> Condition {
        self.session.condition
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn stimuli(&self) -> &[Stimulus] {
        &self.stimuli
    }

    /// Scores a click on the stimulus at `index` and returns the assembled
    /// trial event. Every stimulus whose value equals the set maximum counts
    /// as correct. Repeated clicks on one mount reuse the same baseline.
    pub fn record_click(&mut self, index: usize) -> Result<TrialEvent, TrialError> {
        let t0 = self.presented_at.ok_or(TrialError::NotPresented)?;
        let stimulus = self
            .stimuli
            .get(index)
            .cloned()
            .ok_or(TrialError::IndexOutOfBounds {
                index,
                len: self.stimuli.len(),
            })?;

        let rt = self.clock.elapsed_ms(t0);
        let max = self
            .stimuli
            .iter()
            .map(|s| s.value)
            .fold(f64::NEG_INFINITY, f64::max);
        let correct = stimulus.value == max;

        let event = TrialEvent {
            session_id: self.session.session_id().to_string(),
            participant_id: self.session.participant_id(),
            condition: self.session.condition,
            trial_index: index,
            response: stimulus.name.clone(),
            stimulus,
            correct,
            rt,
            viewport: self.environment.viewport(),
            reduced_motion: self.environment.reduced_motion(),
            timestamp: Utc::now(),
        };

        self.notifier.acknowledge(correct);
        Ok(event)
    }
}
