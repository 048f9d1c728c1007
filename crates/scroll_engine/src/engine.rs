use std::sync::{mpsc, Arc};
use std::thread;

use scroll_logging::{scroll_error, scroll_info};

use crate::client::{ClientSettings, ProcessClient, ReqwestProcessClient};
use crate::{EngineEvent, FailureKind, ProcessError};

enum EngineCommand {
    Process { url: String },
    CheckHealth,
}

/// Runs remote calls on a background tokio runtime and reports results as
/// [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Arc::new(ReqwestProcessClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn ProcessClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    scroll_error!("Failed to start engine runtime: {}", err);
                    fail_all(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(handle_command(client, command, event_tx));
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues one url. Fails only when the engine thread is gone, in which
    /// case no completion will ever arrive for it.
    pub fn submit(&self, url: impl Into<String>) -> Result<(), ProcessError> {
        self.send(EngineCommand::Process { url: url.into() })
    }

    pub fn check_health(&self) -> Result<(), ProcessError> {
        self.send(EngineCommand::CheckHealth)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) -> Result<(), ProcessError> {
        self.cmd_tx.send(command).map_err(|_| {
            ProcessError::new(FailureKind::Unexpected, "engine thread is not running")
        })
    }
}

async fn handle_command(
    client: Arc<dyn ProcessClient>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    // Each call runs as its own task so a panic inside the client still
    // produces an event.
    let event = match command {
        EngineCommand::Process { url } => {
            scroll_info!("POST /process url={}", url);
            let task_url = url.clone();
            let task = tokio::spawn(async move { client.process(&task_url).await });
            let result = task.await.unwrap_or_else(|err| Err(join_failure(err)));
            EngineEvent::ProcessCompleted { url, result }
        }
        EngineCommand::CheckHealth => {
            let task = tokio::spawn(async move { client.health().await });
            EngineEvent::HealthChecked(task.await.unwrap_or_else(|err| Err(join_failure(err))))
        }
    };
    let _ = event_tx.send(event);
}

fn join_failure(err: tokio::task::JoinError) -> ProcessError {
    scroll_error!("Engine task failed: {}", err);
    ProcessError::new(FailureKind::Unexpected, err.to_string())
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: String,
) {
    while let Ok(command) = cmd_rx.recv() {
        let failure = ProcessError::new(FailureKind::Unexpected, reason.clone());
        let event = match command {
            EngineCommand::Process { url } => EngineEvent::ProcessCompleted {
                url,
                result: Err(failure),
            },
            EngineCommand::CheckHealth => EngineEvent::HealthChecked(Err(failure)),
        };
        if event_tx.send(event).is_err() {
            return;
        }
    }
}
