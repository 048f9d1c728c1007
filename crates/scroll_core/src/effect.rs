use std::time::Duration;

use crate::{CardId, CardView, NotificationId, Severity};

/// Side effects requested by [`crate::update`]; the host applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Disable (busy) or re-enable the trigger and toggle the loading visuals.
    SetProcessing { busy: bool },
    /// Issue the remote processing call for `url`.
    SubmitUrl { url: String },
    /// Show or clear the error affordance on the input field.
    SetInputError { visible: bool },
    /// Attach a notification element, fully transparent.
    InsertNotification {
        id: NotificationId,
        message: String,
        severity: Severity,
    },
    RevealNotification { id: NotificationId },
    FadeNotification { id: NotificationId },
    RemoveNotification { id: NotificationId },
    /// Attach a card right after the input section, in its pre-animation state.
    InsertCard { id: CardId, card: CardView },
    AnimateCardIn { id: CardId },
    SetCardThumbnail { id: CardId, url: String },
    FadeCard { id: CardId },
    RemoveCard { id: CardId },
    /// Deliver `Msg::TimerFired(event)` once `delay` has elapsed.
    ScheduleTimer { delay: Duration, event: TimerEvent },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    RevealNotification(NotificationId),
    FadeNotification(NotificationId),
    RemoveNotification(NotificationId),
    AnimateCard(CardId),
    RemoveCard(CardId),
}
