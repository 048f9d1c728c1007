use scroll_logging::{scroll_debug, scroll_info, scroll_warn};

use crate::{
    is_valid_video_url, AppState, Effect, Msg, Severity, SubmissionError, SubmissionState,
    TimerEvent, ValidationError, VideoRecord,
};

pub const PROCESSING_MESSAGE: &str = "Processing video...";
pub const SUCCESS_MESSAGE: &str = "Video processed successfully!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(value) => {
            let becomes_valid = is_valid_video_url(&value);
            state.set_input(value);
            if becomes_valid {
                state.set_input_error(false).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::SubmitRequested => submit(&mut state),
        Msg::InputBlurred => {
            let value = state.input().trim();
            let invalid = !value.is_empty() && !is_valid_video_url(value);
            state.set_input_error(invalid).into_iter().collect()
        }
        Msg::InputFocused => state.set_input_error(false).into_iter().collect(),
        Msg::ProcessCompleted(result) => complete(&mut state, result),
        Msg::CardDismissed { card_id } => {
            let (card, timings) = state.card_mut();
            let effects = card.dismiss(card_id, timings);
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::ThumbnailFailed { card_id } => {
            let (card, _) = state.card_mut();
            let effects = card.thumbnail_failed(card_id);
            if !effects.is_empty() {
                scroll_debug!("Thumbnail fallback for card {:?}", card_id);
                state.mark_dirty();
            }
            effects
        }
        Msg::TimerFired(event) => {
            let effects = match event {
                TimerEvent::RevealNotification(_)
                | TimerEvent::FadeNotification(_)
                | TimerEvent::RemoveNotification(_) => {
                    let (notifications, timings) = state.notifications_mut();
                    notifications.on_timer(event, timings)
                }
                TimerEvent::AnimateCard(_) | TimerEvent::RemoveCard(_) => {
                    let (card, _) = state.card_mut();
                    card.on_timer(event)
                }
            };
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // Only one request may be in flight; extra triggers are dropped, not queued.
    if state.submission() == SubmissionState::Processing {
        scroll_debug!("Submit ignored while a request is in flight");
        return Vec::new();
    }

    let url = state.input().trim().to_string();
    if let Err(err) = validate_input(&url) {
        scroll_warn!("Submission rejected: {}", err);
        let error = SubmissionError::from(err);
        return state.notify(error.user_message(), Severity::Warning);
    }

    scroll_info!("Submitting url={}", url);
    let mut effects = vec![state.begin_processing()];
    effects.extend(state.notify(PROCESSING_MESSAGE, Severity::Info));
    effects.push(Effect::SubmitUrl { url });
    effects
}

fn validate_input(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        Err(ValidationError::Empty)
    } else if !is_valid_video_url(url) {
        Err(ValidationError::Malformed)
    } else {
        Ok(())
    }
}

fn complete(state: &mut AppState, result: Result<VideoRecord, SubmissionError>) -> Vec<Effect> {
    if state.submission() != SubmissionState::Processing {
        scroll_warn!("Completion received with no request in flight; ignoring");
        return Vec::new();
    }

    // The trigger comes back before any outcome handling runs.
    let mut effects = vec![state.finish_processing()];
    match result {
        Ok(record) => {
            scroll_info!("Video {} processed", record.video_id);
            let (card, timings) = state.card_mut();
            effects.extend(card.render(record, timings));
            effects.extend(state.notify(SUCCESS_MESSAGE, Severity::Success));
        }
        Err(err) => {
            scroll_warn!("Processing failed: {}", err);
            effects.extend(state.notify(err.user_message().to_string(), Severity::Error));
        }
    }
    effects
}
