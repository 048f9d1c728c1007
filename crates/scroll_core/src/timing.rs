use std::time::Duration;

/// Delays that drive the staged transitions of notifications and cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long an `info` notification stays up.
    pub info_ttl: Duration,
    /// How long every other notification stays up.
    pub notice_ttl: Duration,
    /// Gap between inserting a notification and fading it in (one frame).
    pub frame: Duration,
    /// Opacity transition before a notification is detached.
    pub notification_fade: Duration,
    /// Layout settle time before a card animates in.
    pub card_animate_delay: Duration,
    /// Fade-out transition before a card is detached.
    pub card_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            info_ttl: Duration::from_millis(6000),
            notice_ttl: Duration::from_millis(4000),
            frame: Duration::from_millis(16),
            notification_fade: Duration::from_millis(300),
            card_animate_delay: Duration::from_millis(100),
            card_fade: Duration::from_millis(300),
        }
    }
}
