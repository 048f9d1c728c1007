//! Scroll Good core: pure submission state machine, notification and card
//! lifecycles, and view-model helpers.
mod card;
mod effect;
mod error;
mod msg;
mod notification;
mod record;
mod state;
mod timing;
mod update;
mod validate;
mod view_model;

pub use card::{
    fallback_thumbnail_url, format_summary, CardId, CardPhase, CardSnapshot, CardView,
    ResultRenderer,
};
pub use effect::{Effect, TimerEvent};
pub use error::{
    SubmissionError, ValidationError, EMPTY_INPUT_MESSAGE, INVALID_INPUT_MESSAGE,
    PROTOCOL_MESSAGE, SERVICE_FALLBACK_MESSAGE, TRANSPORT_MESSAGE, UNEXPECTED_MESSAGE,
};
pub use msg::Msg;
pub use notification::{
    NotificationChannel, NotificationId, NotificationPhase, NotificationRequest,
    NotificationView, Severity,
};
pub use record::VideoRecord;
pub use state::{AppState, SubmissionState};
pub use timing::Timings;
pub use update::{update, PROCESSING_MESSAGE, SUCCESS_MESSAGE};
pub use validate::{extract_video_id, is_valid_video_url};
pub use view_model::AppViewModel;
