use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata object returned under `video` by a successful `/process` call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessedVideo {
    /// The service sends `null` when it could not extract an id.
    #[serde(default)]
    pub video_id: Option<String>,
    pub title: String,
    pub duration: String,
    pub uploader: String,
    pub thumbnail: String,
    pub summary: String,
    #[serde(default)]
    pub view_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ProcessRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuccessBody {
    #[serde(default)]
    pub success: bool,
    pub video: Option<ProcessedVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProcessCompleted {
        url: String,
        result: Result<ProcessedVideo, ProcessError>,
    },
    HealthChecked(Result<HealthStatus, ProcessError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProcessError {
    pub kind: FailureKind,
    pub message: String,
}

impl ProcessError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-2xx answer; the message is the service's own `error` text.
    Service { status: u16 },
    /// The service could not be reached at all.
    Transport,
    /// 2xx answer whose body is not a usable success payload.
    Protocol,
    /// Anything else, such as a client that could not be built.
    Unexpected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Service { status } => write!(f, "service error (http {status})"),
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Protocol => write!(f, "protocol error"),
            FailureKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}
