use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::LevelFilter;
use scroll_core::{update, AppState, CardId, Msg};
use scroll_engine::{ClientSettings, EngineHandle};
use scroll_logging::{scroll_error, scroll_info, scroll_warn, LogDestination, DEFAULT_LOG_FILE};

use super::effects::{EffectRunner, ThreadTimer};
use super::ui;
use super::ui::tree::UiTree;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Everything the host loop reacts to.
pub enum HostEvent {
    Msg(Msg),
    /// Close control of whichever card is currently shown.
    CloseCard,
    /// Thumbnail of whichever card is currently shown failed to load.
    ThumbnailFailed,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    scroll_logging::initialize(host_log_destination(), LevelFilter::Info);

    let tree = ui::layout::initial_tree();
    if let Err(err) = tree.wire() {
        scroll_error!("Required elements not found: {}", err);
        return Err(err.into());
    }

    let (event_tx, event_rx) = mpsc::channel::<HostEvent>();

    let settings = ClientSettings::default();
    scroll_info!("Processing service expected at {}", settings.base_url);
    let engine = EngineHandle::new(settings);
    if let Err(err) = engine.check_health() {
        scroll_warn!("Health check not sent: {}", err);
    }

    let runner = EffectRunner::new(
        Box::new(engine),
        Box::new(ThreadTimer::new(event_tx.clone())),
    );
    spawn_input_reader(event_tx);

    let mut host = Host::new(tree, runner);
    host.print();

    loop {
        match event_rx.recv_timeout(POLL_INTERVAL) {
            Ok(HostEvent::Msg(msg)) => host.dispatch(msg),
            Ok(HostEvent::CloseCard) => {
                host.on_current_card(|card_id| Msg::CardDismissed { card_id })
            }
            Ok(HostEvent::ThumbnailFailed) => {
                host.on_current_card(|card_id| Msg::ThumbnailFailed { card_id })
            }
            Ok(HostEvent::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        host.drain_engine();
    }

    scroll_info!("Host loop finished");
    Ok(())
}

/// Stdout carries the rendered frames, so the host logs to the file only.
fn host_log_destination() -> LogDestination {
    LogDestination::File(DEFAULT_LOG_FILE.into())
}

struct Host {
    state: AppState,
    tree: UiTree,
    runner: EffectRunner,
    last_frame: Vec<String>,
}

impl Host {
    fn new(tree: UiTree, runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            tree,
            runner,
            last_frame: Vec::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let had_effects = !effects.is_empty();
        self.runner.run(effects, &mut self.tree);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty || had_effects {
            self.print();
        }
    }

    fn on_current_card(&mut self, to_msg: impl FnOnce(CardId) -> Msg) {
        match self.state.view().card {
            Some(card) => self.dispatch(to_msg(card.id)),
            None => scroll_info!("No card to act on"),
        }
    }

    fn drain_engine(&mut self) {
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg);
        }
    }

    fn print(&mut self) {
        let frame = ui::render::render(&self.tree, &self.state.view());
        if frame != self.last_frame {
            println!("{}", frame.join("\n"));
            self.last_frame = frame;
        }
    }
}

/// Maps terminal lines onto controller messages.
///
/// A plain line is typed into the input and submitted; `:close` dismisses
/// the card, `:thumb-failed` reports a broken thumbnail, `:quit` exits.
fn spawn_input_reader(event_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    scroll_error!("Failed to read input: {}", err);
                    break;
                }
            };
            let events = match line.trim() {
                ":quit" => vec![HostEvent::Quit],
                ":close" => vec![HostEvent::CloseCard],
                ":thumb-failed" => vec![HostEvent::ThumbnailFailed],
                _ => vec![
                    HostEvent::Msg(Msg::InputFocused),
                    HostEvent::Msg(Msg::InputChanged(line.clone())),
                    HostEvent::Msg(Msg::SubmitRequested),
                    HostEvent::Msg(Msg::InputBlurred),
                ],
            };
            for event in events {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = event_tx.send(HostEvent::Quit);
    });
}
