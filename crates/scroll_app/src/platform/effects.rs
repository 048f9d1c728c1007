use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use scroll_core::{extract_video_id, Effect, Msg, SubmissionError, TimerEvent, VideoRecord};
use scroll_engine::{EngineEvent, EngineHandle, FailureKind, ProcessError, ProcessedVideo};
use scroll_logging::{scroll_error, scroll_info, scroll_warn};

use super::app::HostEvent;
use super::ui::tree::Interface;

/// Where `SubmitUrl` effects go and where their results come back from.
pub trait Backend {
    /// An `Err` means the url never reached the backend and no result will
    /// follow for it.
    fn submit(&mut self, url: String) -> Result<(), ProcessError>;
    fn poll(&mut self) -> Option<EngineEvent>;
}

impl Backend for EngineHandle {
    fn submit(&mut self, url: String) -> Result<(), ProcessError> {
        EngineHandle::submit(self, url)
    }

    fn poll(&mut self) -> Option<EngineEvent> {
        self.try_recv()
    }
}

/// Delivers `Msg::TimerFired` after a delay.
pub trait Timer {
    fn schedule(&self, delay: Duration, event: TimerEvent);
}

pub struct ThreadTimer {
    event_tx: mpsc::Sender<HostEvent>,
}

impl ThreadTimer {
    pub fn new(event_tx: mpsc::Sender<HostEvent>) -> Self {
        Self { event_tx }
    }
}

impl Timer for ThreadTimer {
    fn schedule(&self, delay: Duration, event: TimerEvent) {
        let event_tx = self.event_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = event_tx.send(HostEvent::Msg(Msg::TimerFired(event)));
        });
    }
}

pub struct EffectRunner {
    backend: Box<dyn Backend>,
    timer: Box<dyn Timer>,
    undelivered: VecDeque<EngineEvent>,
}

impl EffectRunner {
    pub fn new(backend: Box<dyn Backend>, timer: Box<dyn Timer>) -> Self {
        Self {
            backend,
            timer,
            undelivered: VecDeque::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>, ui: &mut dyn Interface) {
        for effect in effects {
            match effect {
                Effect::SetProcessing { busy } => ui.set_processing(busy),
                Effect::SubmitUrl { url } => {
                    scroll_info!("SubmitUrl url_len={} url={}", url.len(), url);
                    if let Err(err) = self.backend.submit(url.clone()) {
                        scroll_error!("Submission not delivered: {}", err);
                        self.undelivered.push_back(EngineEvent::ProcessCompleted {
                            url,
                            result: Err(err),
                        });
                    }
                }
                Effect::SetInputError { visible } => ui.set_input_error(visible),
                Effect::InsertNotification {
                    id,
                    message,
                    severity,
                } => ui.insert_notification(id, &message, severity),
                Effect::RevealNotification { id } => ui.set_notification_opacity(id, 1.0),
                Effect::FadeNotification { id } => ui.set_notification_opacity(id, 0.0),
                Effect::RemoveNotification { id } => ui.remove_notification(id),
                Effect::InsertCard { id, card } => ui.insert_card(id, &card),
                Effect::AnimateCardIn { id } => ui.animate_card_in(id),
                Effect::SetCardThumbnail { id, url } => ui.set_card_thumbnail(id, &url),
                Effect::FadeCard { id } => ui.fade_card(id),
                Effect::RemoveCard { id } => ui.remove_card(id),
                Effect::ScheduleTimer { delay, event } => self.timer.schedule(delay, event),
            }
        }
    }

    /// Next engine result translated into a controller message, if any.
    pub fn poll(&mut self) -> Option<Msg> {
        loop {
            let event = match self.undelivered.pop_front() {
                Some(event) => event,
                None => self.backend.poll()?,
            };
            match event {
                EngineEvent::ProcessCompleted { url, result } => {
                    return Some(Msg::ProcessCompleted(map_result(&url, result)));
                }
                EngineEvent::HealthChecked(Ok(health)) => {
                    scroll_info!("Processing service status: {}", health.status);
                }
                EngineEvent::HealthChecked(Err(err)) => {
                    scroll_warn!("Processing service health check failed: {}", err);
                }
            }
        }
    }
}

fn map_result(
    url: &str,
    result: Result<ProcessedVideo, ProcessError>,
) -> Result<VideoRecord, SubmissionError> {
    match result {
        Ok(video) => Ok(VideoRecord {
            video_id: video
                .video_id
                .filter(|id| !id.is_empty())
                .or_else(|| extract_video_id(url))
                .unwrap_or_default(),
            title: video.title,
            duration: video.duration,
            uploader: video.uploader,
            thumbnail_url: video.thumbnail,
            summary: video.summary,
        }),
        Err(err) => Err(match err.kind {
            FailureKind::Service { .. } => SubmissionError::Service {
                message: err.message,
            },
            FailureKind::Transport => SubmissionError::Transport {
                detail: err.message,
            },
            FailureKind::Protocol => SubmissionError::Protocol {
                detail: err.message,
            },
            FailureKind::Unexpected => SubmissionError::Unexpected {
                detail: err.message,
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use scroll_core::{
        update, AppState, NotificationId, SubmissionState, Timings, EMPTY_INPUT_MESSAGE,
        PROCESSING_MESSAGE, SUCCESS_MESSAGE, TRANSPORT_MESSAGE, UNEXPECTED_MESSAGE,
    };

    use super::*;
    use crate::platform::ui::constants::{CLASS_ANIMATE_IN, CLASS_LOADING, GLYPH_BUSY, GLYPH_IDLE};
    use crate::platform::ui::layout::initial_tree;
    use crate::platform::ui::tree::{Node, UiTree};

    const URL: &str = "https://www.youtube.com/watch?v=abc123";

    #[derive(Default)]
    struct FakeBackend {
        submitted: Rc<RefCell<Vec<String>>>,
        replies: Rc<RefCell<VecDeque<EngineEvent>>>,
    }

    impl Backend for FakeBackend {
        fn submit(&mut self, url: String) -> Result<(), ProcessError> {
            self.submitted.borrow_mut().push(url);
            Ok(())
        }

        fn poll(&mut self) -> Option<EngineEvent> {
            self.replies.borrow_mut().pop_front()
        }
    }

    #[derive(Default)]
    struct ManualTimer {
        pending: Rc<RefCell<Vec<(Duration, TimerEvent)>>>,
    }

    impl Timer for ManualTimer {
        fn schedule(&self, delay: Duration, event: TimerEvent) {
            self.pending.borrow_mut().push((delay, event));
        }
    }

    struct Harness {
        state: AppState,
        tree: UiTree,
        runner: EffectRunner,
        submitted: Rc<RefCell<Vec<String>>>,
        replies: Rc<RefCell<VecDeque<EngineEvent>>>,
        timers: Rc<RefCell<Vec<(Duration, TimerEvent)>>>,
    }

    impl Harness {
        fn new() -> Self {
            scroll_logging::initialize_for_tests();
            let backend = FakeBackend::default();
            let timer = ManualTimer::default();
            let submitted = backend.submitted.clone();
            let replies = backend.replies.clone();
            let timers = timer.pending.clone();
            Self {
                state: AppState::with_timings(Timings::default()),
                tree: initial_tree(),
                runner: EffectRunner::new(Box::new(backend), Box::new(timer)),
                submitted,
                replies,
                timers,
            }
        }

        fn dispatch(&mut self, msg: Msg) {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            self.runner.run(effects, &mut self.tree);
        }

        fn submit(&mut self, input: &str) {
            self.dispatch(Msg::InputChanged(input.to_string()));
            self.dispatch(Msg::SubmitRequested);
        }

        fn reply(&mut self, result: Result<ProcessedVideo, ProcessError>) {
            self.replies
                .borrow_mut()
                .push_back(EngineEvent::ProcessCompleted {
                    url: URL.to_string(),
                    result,
                });
            while let Some(msg) = self.runner.poll() {
                self.dispatch(msg);
            }
        }

        /// Fires every scheduled timer, including ones scheduled while firing.
        fn run_timers(&mut self) {
            loop {
                let pending: Vec<_> = self.timers.borrow_mut().drain(..).collect();
                if pending.is_empty() {
                    break;
                }
                for (_, event) in pending {
                    self.dispatch(Msg::TimerFired(event));
                }
            }
        }

        fn notification_messages(&self) -> Vec<String> {
            self.tree
                .notifications()
                .map(|notification| notification.message.clone())
                .collect()
        }
    }

    fn sample_video() -> ProcessedVideo {
        ProcessedVideo {
            video_id: Some("abc123".to_string()),
            title: "T".to_string(),
            duration: "3:00".to_string(),
            uploader: "U".to_string(),
            thumbnail: "x.jpg".to_string(),
            summary: "**Hi**\n📹 note".to_string(),
            view_count: None,
        }
    }

    #[test]
    fn valid_submission_disables_trigger_and_issues_request() {
        let mut harness = Harness::new();
        harness.submit(URL);

        let trigger = harness.tree.trigger.as_ref().unwrap();
        assert!(trigger.disabled);
        assert!(trigger.classes.contains(CLASS_LOADING));
        assert_eq!(harness.tree.glyph.as_ref().unwrap().text, GLYPH_BUSY);
        assert_eq!(harness.notification_messages(), vec![PROCESSING_MESSAGE]);
        assert_eq!(*harness.submitted.borrow(), vec![URL.to_string()]);
    }

    #[test]
    fn second_submit_while_processing_sends_nothing() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.dispatch(Msg::SubmitRequested);
        harness.dispatch(Msg::SubmitRequested);

        assert_eq!(harness.submitted.borrow().len(), 1);
        assert_eq!(harness.state.submission(), SubmissionState::Processing);
    }

    #[test]
    fn success_places_one_card_after_anchor_section() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.reply(Ok(sample_video()));
        harness.run_timers();

        let cards: Vec<_> = harness.tree.cards().collect();
        assert_eq!(cards.len(), 1);
        let card = cards[0];
        assert_eq!(card.title, "T");
        assert_eq!(card.uploader, "by U");
        assert_eq!(
            card.summary_html,
            r#"<strong>Hi</strong><br><span class="emoji">📹</span> note"#
        );
        assert!(card.card_classes.contains(CLASS_ANIMATE_IN));
        assert!(matches!(
            harness.tree.body[1],
            Node::Section { class: "youtube-section" }
        ));
        assert!(matches!(harness.tree.body[2], Node::Card(_)));

        let trigger = harness.tree.trigger.as_ref().unwrap();
        assert!(!trigger.disabled);
        assert_eq!(harness.tree.glyph.as_ref().unwrap().text, GLYPH_IDLE);
    }

    #[test]
    fn success_notification_replaces_processing_notification() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.reply(Ok(sample_video()));

        assert_eq!(harness.notification_messages(), vec![SUCCESS_MESSAGE]);
    }

    #[test]
    fn rendering_again_keeps_exactly_one_card() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.reply(Ok(sample_video()));
        harness.dispatch(Msg::SubmitRequested);
        harness.reply(Ok(ProcessedVideo {
            title: "Second".to_string(),
            ..sample_video()
        }));

        let titles: Vec<_> = harness.tree.cards().map(|card| card.title.clone()).collect();
        assert_eq!(titles, vec!["Second".to_string()]);
    }

    #[test]
    fn service_error_shows_message_and_no_card() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.reply(Err(ProcessError::new(
            FailureKind::Service { status: 500 },
            "bad id",
        )));

        assert_eq!(harness.notification_messages(), vec!["bad id"]);
        assert_eq!(harness.tree.cards().count(), 0);
        assert!(!harness.tree.trigger.as_ref().unwrap().disabled);
    }

    #[test]
    fn unreachable_service_shows_fixed_message() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.reply(Err(ProcessError::new(
            FailureKind::Transport,
            "connection refused",
        )));

        assert_eq!(harness.notification_messages(), vec![TRANSPORT_MESSAGE]);
        assert!(!harness.tree.trigger.as_ref().unwrap().disabled);
    }

    #[test]
    fn empty_input_warns_and_sends_nothing() {
        let mut harness = Harness::new();
        harness.submit("");

        assert_eq!(harness.notification_messages(), vec![EMPTY_INPUT_MESSAGE]);
        assert!(harness.submitted.borrow().is_empty());
        assert_eq!(harness.state.submission(), SubmissionState::Idle);
    }

    #[test]
    fn notification_fades_in_then_out_and_detaches() {
        let mut harness = Harness::new();
        harness.submit("");
        let id = NotificationId(1);

        let (_, reveal) = harness.timers.borrow()[0];
        harness.timers.borrow_mut().remove(0);
        harness.dispatch(Msg::TimerFired(reveal));
        assert_eq!(harness.tree.notifications().next().unwrap().opacity, 1.0);

        harness.timers.borrow_mut().clear();
        harness.dispatch(Msg::TimerFired(TimerEvent::FadeNotification(id)));
        assert_eq!(harness.tree.notifications().next().unwrap().opacity, 0.0);
        assert_eq!(
            *harness.timers.borrow(),
            vec![(
                Timings::default().notification_fade,
                TimerEvent::RemoveNotification(id)
            )]
        );

        harness.run_timers();
        assert_eq!(harness.tree.notifications().count(), 0);
    }

    #[test]
    fn dismissed_card_is_detached_after_fade() {
        let mut harness = Harness::new();
        harness.submit(URL);
        harness.reply(Ok(sample_video()));
        harness.run_timers();
        let card_id = harness.tree.cards().next().unwrap().id;

        harness.dispatch(Msg::CardDismissed { card_id });
        assert!(harness
            .tree
            .cards()
            .next()
            .unwrap()
            .container_classes
            .contains("fade-out"));

        harness.run_timers();
        assert_eq!(harness.tree.cards().count(), 0);
    }

    #[test]
    fn missing_video_id_is_recovered_from_url() {
        let record = map_result(
            "https://youtu.be/zzz999",
            Ok(ProcessedVideo {
                video_id: None,
                ..sample_video()
            }),
        )
        .unwrap();
        assert_eq!(record.video_id, "zzz999");
    }

    struct RefusingBackend;

    impl Backend for RefusingBackend {
        fn submit(&mut self, _url: String) -> Result<(), ProcessError> {
            Err(ProcessError::new(FailureKind::Unexpected, "engine gone"))
        }

        fn poll(&mut self) -> Option<EngineEvent> {
            None
        }
    }

    #[test]
    fn undelivered_submission_reenables_trigger() {
        scroll_logging::initialize_for_tests();
        let mut tree = initial_tree();
        let mut runner =
            EffectRunner::new(Box::new(RefusingBackend), Box::new(ManualTimer::default()));
        let mut state = AppState::new();
        for msg in [Msg::InputChanged(URL.to_string()), Msg::SubmitRequested] {
            let (next, effects) = update(state, msg);
            state = next;
            runner.run(effects, &mut tree);
        }
        assert!(tree.trigger.as_ref().unwrap().disabled);

        let msg = runner.poll().expect("completion for the undelivered url");
        let (state, effects) = update(state, msg);
        runner.run(effects, &mut tree);

        assert_eq!(state.submission(), SubmissionState::Idle);
        assert!(!tree.trigger.as_ref().unwrap().disabled);
        let messages: Vec<_> = tree.notifications().map(|n| n.message.clone()).collect();
        assert_eq!(messages, vec![UNEXPECTED_MESSAGE]);
        assert!(runner.poll().is_none());
    }

    #[test]
    fn wiring_requires_input_and_trigger() {
        let mut tree = initial_tree();
        assert!(tree.wire().is_ok());

        tree.trigger = None;
        assert_eq!(
            tree.wire(),
            Err(crate::platform::ui::tree::WiringError::MissingTrigger)
        );

        tree.input = None;
        assert_eq!(
            tree.wire(),
            Err(crate::platform::ui::tree::WiringError::MissingInput)
        );
    }
}
