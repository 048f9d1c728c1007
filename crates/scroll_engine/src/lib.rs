//! Scroll Good engine: remote processing client and the background runner
//! that executes it.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, ProcessClient, ReqwestProcessClient, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use types::{EngineEvent, FailureKind, HealthStatus, ProcessError, ProcessedVideo};
