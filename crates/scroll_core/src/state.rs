use crate::view_model::AppViewModel;
use crate::{
    Effect, NotificationChannel, NotificationRequest, ResultRenderer, Severity, Timings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    submission: SubmissionState,
    input: String,
    input_error: bool,
    notifications: NotificationChannel,
    card: ResultRenderer,
    timings: Timings,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            submission: self.submission,
            input: self.input.clone(),
            input_error: self.input_error,
            notification: self.notifications.view(),
            card: self.card.view(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, value: String) {
        if self.input != value {
            self.input = value;
            self.mark_dirty();
        }
    }

    /// Returns the effect to emit when the error affordance actually changes.
    pub(crate) fn set_input_error(&mut self, visible: bool) -> Option<Effect> {
        if self.input_error == visible {
            return None;
        }
        self.input_error = visible;
        self.mark_dirty();
        Some(Effect::SetInputError { visible })
    }

    pub(crate) fn begin_processing(&mut self) -> Effect {
        self.submission = SubmissionState::Processing;
        self.mark_dirty();
        Effect::SetProcessing { busy: true }
    }

    pub(crate) fn finish_processing(&mut self) -> Effect {
        self.submission = SubmissionState::Idle;
        self.mark_dirty();
        Effect::SetProcessing { busy: false }
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Vec<Effect> {
        let request = NotificationRequest::new(message, severity, &self.timings);
        self.mark_dirty();
        self.notifications.notify(request, &self.timings)
    }

    pub(crate) fn notifications_mut(&mut self) -> (&mut NotificationChannel, &Timings) {
        (&mut self.notifications, &self.timings)
    }

    pub(crate) fn card_mut(&mut self) -> (&mut ResultRenderer, &Timings) {
        (&mut self.card, &self.timings)
    }
}
