use crate::{CardId, SubmissionError, TimerEvent, VideoRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// Submit button clicked or Enter pressed in the input.
    SubmitRequested,
    /// URL input lost focus.
    InputBlurred,
    /// URL input gained focus.
    InputFocused,
    /// The remote call for the in-flight submission resolved.
    ProcessCompleted(Result<VideoRecord, SubmissionError>),
    /// User clicked the close control of a card.
    CardDismissed { card_id: CardId },
    /// The primary thumbnail of a card failed to load.
    ThumbnailFailed { card_id: CardId },
    /// A timer scheduled through `Effect::ScheduleTimer` elapsed.
    TimerFired(TimerEvent),
}
