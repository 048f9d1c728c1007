use std::time::Duration;

use scroll_logging::scroll_debug;

use crate::{Effect, TimerEvent, Timings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Background colour of the notification banner.
    pub fn background(self) -> &'static str {
        match self {
            Severity::Info => "#3b82f6",
            Severity::Success => "#10b981",
            Severity::Warning => "#f59e0b",
            Severity::Error => "#ef4444",
        }
    }

    /// `info` marks work in progress and stays up longer.
    pub fn ttl(self, timings: &Timings) -> Duration {
        match self {
            Severity::Info => timings.info_ttl,
            Severity::Success | Severity::Warning | Severity::Error => timings.notice_ttl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub message: String,
    pub severity: Severity,
    pub ttl: Duration,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>, severity: Severity, timings: &Timings) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl: severity.ttl(timings),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Attached but still transparent.
    Pending,
    Visible,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub phase: NotificationPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LiveNotification {
    id: NotificationId,
    request: NotificationRequest,
    phase: NotificationPhase,
}

/// Single-slot notification area.
///
/// Each notification goes `Pending -> Visible -> FadingOut -> Removed`. A new
/// request detaches the current one on the spot, and timers that still refer
/// to a replaced notification are ignored when they fire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationChannel {
    current: Option<LiveNotification>,
    next_id: u64,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, request: NotificationRequest, timings: &Timings) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(5);
        if let Some(previous) = self.current.take() {
            scroll_debug!("Replacing notification {:?}", previous.id);
            effects.push(Effect::RemoveNotification { id: previous.id });
        }

        self.next_id += 1;
        let id = NotificationId(self.next_id);
        effects.push(Effect::InsertNotification {
            id,
            message: request.message.clone(),
            severity: request.severity,
        });
        effects.push(Effect::ScheduleTimer {
            delay: timings.frame,
            event: TimerEvent::RevealNotification(id),
        });
        effects.push(Effect::ScheduleTimer {
            delay: request.ttl,
            event: TimerEvent::FadeNotification(id),
        });

        self.current = Some(LiveNotification {
            id,
            request,
            phase: NotificationPhase::Pending,
        });
        effects
    }

    /// Advances the lifecycle for a timer owned by this channel.
    pub fn on_timer(&mut self, event: TimerEvent, timings: &Timings) -> Vec<Effect> {
        let Some(live) = self.current.as_mut() else {
            return Vec::new();
        };

        match event {
            TimerEvent::RevealNotification(id)
                if id == live.id && live.phase == NotificationPhase::Pending =>
            {
                live.phase = NotificationPhase::Visible;
                vec![Effect::RevealNotification { id }]
            }
            TimerEvent::FadeNotification(id)
                if id == live.id && live.phase != NotificationPhase::FadingOut =>
            {
                live.phase = NotificationPhase::FadingOut;
                vec![
                    Effect::FadeNotification { id },
                    Effect::ScheduleTimer {
                        delay: timings.notification_fade,
                        event: TimerEvent::RemoveNotification(id),
                    },
                ]
            }
            TimerEvent::RemoveNotification(id)
                if id == live.id && live.phase == NotificationPhase::FadingOut =>
            {
                self.current = None;
                vec![Effect::RemoveNotification { id }]
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> Option<NotificationView> {
        self.current.as_ref().map(|live| NotificationView {
            id: live.id,
            message: live.request.message.clone(),
            severity: live.request.severity,
            phase: live.phase,
        })
    }
}
