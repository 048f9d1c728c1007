use std::sync::Once;

use pretty_assertions::assert_eq;
use scroll_core::{
    update, AppState, Effect, Msg, NotificationId, Severity, SubmissionError, SubmissionState,
    TimerEvent, Timings, VideoRecord, EMPTY_INPUT_MESSAGE, INVALID_INPUT_MESSAGE,
    PROCESSING_MESSAGE, PROTOCOL_MESSAGE, SERVICE_FALLBACK_MESSAGE, SUCCESS_MESSAGE,
    TRANSPORT_MESSAGE, UNEXPECTED_MESSAGE,
};

const URL: &str = "https://www.youtube.com/watch?v=abc123";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scroll_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitRequested)
}

fn processing_state() -> AppState {
    let (state, _) = submit(AppState::new(), URL);
    assert_eq!(state.submission(), SubmissionState::Processing);
    state
}

fn sample_record() -> VideoRecord {
    VideoRecord {
        video_id: "abc123".to_string(),
        title: "T".to_string(),
        duration: "3:00".to_string(),
        uploader: "U".to_string(),
        thumbnail_url: "x.jpg".to_string(),
        summary: "**Hi**\n📹 note".to_string(),
    }
}

fn submitted_urls(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::SubmitUrl { url } => Some(url.as_str()),
            _ => None,
        })
        .collect()
}

fn inserted_notifications(effects: &[Effect]) -> Vec<(String, Severity)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::InsertNotification {
                message, severity, ..
            } => Some((message.clone(), *severity)),
            _ => None,
        })
        .collect()
}

#[test]
fn valid_submission_disables_trigger_notifies_and_issues_request() {
    init_logging();
    let timings = Timings::default();
    let (state, effects) = submit(AppState::new(), URL);

    assert_eq!(state.submission(), SubmissionState::Processing);
    assert!(!state.view().trigger_enabled());
    assert_eq!(
        effects,
        vec![
            Effect::SetProcessing { busy: true },
            Effect::InsertNotification {
                id: NotificationId(1),
                message: PROCESSING_MESSAGE.to_string(),
                severity: Severity::Info,
            },
            Effect::ScheduleTimer {
                delay: timings.frame,
                event: TimerEvent::RevealNotification(NotificationId(1)),
            },
            Effect::ScheduleTimer {
                delay: timings.info_ttl,
                event: TimerEvent::FadeNotification(NotificationId(1)),
            },
            Effect::SubmitUrl {
                url: URL.to_string(),
            },
        ]
    );
}

#[test]
fn submitted_url_is_trimmed() {
    init_logging();
    let (_state, effects) = submit(AppState::new(), "  https://youtu.be/abc123  ");
    assert_eq!(submitted_urls(&effects), vec!["https://youtu.be/abc123"]);
}

#[test]
fn empty_input_warns_without_request() {
    init_logging();
    for input in ["", "   "] {
        let (state, effects) = submit(AppState::new(), input);

        assert_eq!(state.submission(), SubmissionState::Idle);
        assert!(submitted_urls(&effects).is_empty());
        assert_eq!(
            inserted_notifications(&effects),
            vec![(EMPTY_INPUT_MESSAGE.to_string(), Severity::Warning)]
        );
    }
}

#[test]
fn invalid_input_warns_without_request() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://vimeo.com/42");

    assert_eq!(state.submission(), SubmissionState::Idle);
    assert!(submitted_urls(&effects).is_empty());
    assert!(!effects.contains(&Effect::SetProcessing { busy: true }));
    assert_eq!(
        inserted_notifications(&effects),
        vec![(INVALID_INPUT_MESSAGE.to_string(), Severity::Warning)]
    );
}

#[test]
fn submit_while_processing_is_dropped() {
    init_logging();
    let state = processing_state();
    let before = state.view();

    let (next, effects) = update(state, Msg::SubmitRequested);

    assert!(effects.is_empty());
    assert_eq!(next.view(), before);

    let (next, effects) = submit(next, "https://youtu.be/other");
    assert!(submitted_urls(&effects).is_empty());
    assert_eq!(next.submission(), SubmissionState::Processing);
}

#[test]
fn success_renders_card_and_reenables_trigger() {
    init_logging();
    let state = processing_state();

    let (state, effects) = update(state, Msg::ProcessCompleted(Ok(sample_record())));

    assert_eq!(effects[0], Effect::SetProcessing { busy: false });
    assert_eq!(state.submission(), SubmissionState::Idle);

    let card = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::InsertCard { card, .. } => Some(card.clone()),
            _ => None,
        })
        .expect("card inserted");
    assert_eq!(card.title, "T");
    assert_eq!(card.duration, "3:00");
    assert_eq!(card.uploader_label, "by U");
    assert_eq!(card.thumbnail_url, "x.jpg");
    assert_eq!(
        card.summary_html,
        r#"<strong>Hi</strong><br><span class="emoji">📹</span> note"#
    );

    assert_eq!(
        inserted_notifications(&effects),
        vec![(SUCCESS_MESSAGE.to_string(), Severity::Success)]
    );
    let view = state.view();
    assert!(view.trigger_enabled());
    assert_eq!(view.card.map(|snapshot| snapshot.card), Some(card));
}

#[test]
fn service_error_is_surfaced_verbatim_without_card() {
    init_logging();
    let state = processing_state();

    let (state, effects) = update(
        state,
        Msg::ProcessCompleted(Err(SubmissionError::Service {
            message: "bad id".to_string(),
        })),
    );

    assert_eq!(effects[0], Effect::SetProcessing { busy: false });
    assert_eq!(
        inserted_notifications(&effects),
        vec![("bad id".to_string(), Severity::Error)]
    );
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::InsertCard { .. })));
    assert!(state.view().card.is_none());
    assert!(state.view().trigger_enabled());
}

#[test]
fn failure_kinds_map_to_fixed_messages() {
    init_logging();
    let cases = [
        (
            SubmissionError::Transport {
                detail: "connection refused".to_string(),
            },
            TRANSPORT_MESSAGE,
        ),
        (
            SubmissionError::Protocol {
                detail: "missing video".to_string(),
            },
            PROTOCOL_MESSAGE,
        ),
        (
            SubmissionError::Unexpected {
                detail: "worker gone".to_string(),
            },
            UNEXPECTED_MESSAGE,
        ),
        (
            SubmissionError::Service {
                message: String::new(),
            },
            SERVICE_FALLBACK_MESSAGE,
        ),
    ];

    for (error, expected) in cases {
        let (state, effects) = update(processing_state(), Msg::ProcessCompleted(Err(error)));
        assert_eq!(effects[0], Effect::SetProcessing { busy: false });
        assert_eq!(
            inserted_notifications(&effects),
            vec![(expected.to_string(), Severity::Error)]
        );
        assert_eq!(state.submission(), SubmissionState::Idle);
    }
}

#[test]
fn new_submission_allowed_after_completion() {
    init_logging();
    let (state, _) = update(
        processing_state(),
        Msg::ProcessCompleted(Err(SubmissionError::Transport {
            detail: "refused".to_string(),
        })),
    );

    let (state, effects) = update(state, Msg::SubmitRequested);
    assert_eq!(submitted_urls(&effects), vec![URL]);
    assert_eq!(state.submission(), SubmissionState::Processing);
}

#[test]
fn stray_completion_while_idle_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ProcessCompleted(Ok(sample_record())));

    assert!(effects.is_empty());
    assert_eq!(next, state);
}
