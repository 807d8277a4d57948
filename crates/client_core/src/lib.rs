pub mod logger;
pub mod session;
pub mod stimuli;
pub mod trial;

pub use logger::{EventSink, HttpEventLogger, SubmitOutcome};
pub use session::SessionContext;
pub use stimuli::StimulusSource;
pub use trial::{
    Clock, EnvironmentProbe, FixedEnvironment, MonotonicClock, Notifier, SilentNotifier,
    TrialController, TrialError, TrialPhase,
};

use shared::domain::{Condition, TrialEvent};

/// Front-to-back experiment pipeline: stimulus load, trial capture, event
/// submission.
pub struct ExperimentClient<N: Notifier, E: EnvironmentProbe> {
    source: StimulusSource,
    sink: Box<dyn EventSink>,
    controller: TrialController<MonotonicClock, N, E>,
}

impl<N: Notifier, E: EnvironmentProbe> ExperimentClient<N, E> {
    pub fn new(
        server_url: impl Into<String>,
        session: SessionContext,
        notifier: N,
        environment: E,
    ) -> Self {
        let server_url = server_url.into();
        Self {
            source: StimulusSource::new(server_url.clone()),
            sink: Box::new(HttpEventLogger::new(server_url)),
            controller: TrialController::new(session, MonotonicClock, notifier, environment),
        }
    }

    /// Swaps the submission channel, for callers that route events somewhere
    /// other than the HTTP service.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Loads the stimulus set (falling back to the demo data when the
    /// endpoint is unavailable) and presents it. Returns the number of
    /// click targets now on screen.
    pub async fn begin_trial(&mut self) -> usize {
        let stimuli = self.source.load().await;
        self.controller.present(stimuli);
        self.controller.stimuli().len()
    }

    /// Records a click and submits the resulting event. A failed submission
    /// is reported in the outcome and never disturbs the trial state.
    pub async fn click(&mut self, index: usize) -> Result<(TrialEvent, SubmitOutcome), TrialError> {
        let event = self.controller.record_click(index)?;
        let outcome = self.sink.submit(&event).await;
        Ok((event, outcome))
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.controller.set_condition(condition);
    }

    pub fn controller(&self) -> &TrialController<MonotonicClock, N, E> {
        &self.controller
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
