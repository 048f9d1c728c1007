use thiserror::Error;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a YouTube URL";
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a valid YouTube URL";
pub const SERVICE_FALLBACK_MESSAGE: &str = "Failed to process video";
pub const TRANSPORT_MESSAGE: &str =
    "Backend server not running. Please start the processing server.";
pub const PROTOCOL_MESSAGE: &str = "Invalid response from server";
pub const UNEXPECTED_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input is empty")]
    Empty,
    #[error("input is not a supported video url")]
    Malformed,
}

/// Every way a submission can fail. `Display` is meant for logs,
/// [`SubmissionError::user_message`] for the notification text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("service rejected the request: {message}")]
    Service { message: String },
    #[error("service unreachable: {detail}")]
    Transport { detail: String },
    #[error("malformed service response: {detail}")]
    Protocol { detail: String },
    #[error("unexpected failure: {detail}")]
    Unexpected { detail: String },
}

impl SubmissionError {
    pub fn user_message(&self) -> &str {
        match self {
            SubmissionError::Validation(ValidationError::Empty) => EMPTY_INPUT_MESSAGE,
            SubmissionError::Validation(ValidationError::Malformed) => INVALID_INPUT_MESSAGE,
            SubmissionError::Service { message } if message.trim().is_empty() => {
                SERVICE_FALLBACK_MESSAGE
            }
            SubmissionError::Service { message } => message.as_str(),
            SubmissionError::Transport { .. } => TRANSPORT_MESSAGE,
            SubmissionError::Protocol { .. } => PROTOCOL_MESSAGE,
            SubmissionError::Unexpected { .. } => UNEXPECTED_MESSAGE,
        }
    }
}
