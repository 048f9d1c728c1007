use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use scroll_logging::{scroll_debug, scroll_warn};

use crate::types::{ErrorBody, ProcessRequest, SuccessBody};
use crate::{FailureKind, HealthStatus, ProcessError, ProcessedVideo};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Service root; `/process` and `/health` are appended.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` leaves the request unbounded; only transport failures end it.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            user_agent: concat!("scroll_good/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn process_url(&self) -> String {
        self.endpoint("process")
    }

    pub fn health_url(&self) -> String {
        self.endpoint("health")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
pub trait ProcessClient: Send + Sync {
    /// Submits one video url and classifies the outcome.
    async fn process(&self, url: &str) -> Result<ProcessedVideo, ProcessError>;

    async fn health(&self) -> Result<HealthStatus, ProcessError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProcessClient {
    settings: ClientSettings,
}

impl ReqwestProcessClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, ProcessError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .user_agent(self.settings.user_agent.clone());
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ProcessError::new(FailureKind::Unexpected, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ProcessClient for ReqwestProcessClient {
    async fn process(&self, url: &str) -> Result<ProcessedVideo, ProcessError> {
        let client = self.build_client()?;
        let body = serde_json::to_vec(&ProcessRequest { url })
            .map_err(|err| ProcessError::new(FailureKind::Unexpected, err.to_string()))?;

        let response = client
            .post(self.settings.process_url())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        scroll_debug!("/process answered {} with {} bytes", status, bytes.len());

        if !status.is_success() {
            // The service's `error` text is shown verbatim; an empty message
            // lets the caller fall back to its own wording.
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_default();
            return Err(ProcessError::new(
                FailureKind::Service {
                    status: status.as_u16(),
                },
                message,
            ));
        }

        let parsed: SuccessBody = serde_json::from_slice(&bytes).map_err(|err| {
            scroll_warn!("Unparseable /process payload: {}", err);
            ProcessError::new(FailureKind::Protocol, err.to_string())
        })?;

        match parsed {
            SuccessBody {
                success: true,
                video: Some(video),
            } => Ok(video),
            SuccessBody { success, video } => Err(ProcessError::new(
                FailureKind::Protocol,
                format!(
                    "success={success}, video {}",
                    if video.is_some() { "present" } else { "missing" }
                ),
            )),
        }
    }

    async fn health(&self) -> Result<HealthStatus, ProcessError> {
        let client = self.build_client()?;
        let response = client
            .get(self.settings.health_url())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProcessError::new(
                FailureKind::Service {
                    status: status.as_u16(),
                },
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ProcessError::new(FailureKind::Protocol, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProcessError {
    if err.is_builder() {
        return ProcessError::new(FailureKind::Unexpected, err.to_string());
    }
    ProcessError::new(FailureKind::Transport, err.to_string())
}
