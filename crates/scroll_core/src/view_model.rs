use crate::{CardSnapshot, NotificationView, SubmissionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub submission: SubmissionState,
    pub input: String,
    pub input_error: bool,
    pub notification: Option<NotificationView>,
    pub card: Option<CardSnapshot>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn trigger_enabled(&self) -> bool {
        self.submission == SubmissionState::Idle
    }
}
