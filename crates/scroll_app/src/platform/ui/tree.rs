//! In-memory interface tree the effect runner draws into.

use std::collections::BTreeSet;

use scroll_core::{CardId, CardView, NotificationId, Severity};
use scroll_logging::scroll_warn;
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WiringError {
    #[error("url input element not found")]
    MissingInput,
    #[error("submit trigger element not found")]
    MissingTrigger,
}

/// Operations the controller needs from whatever hosts the page.
pub trait Interface {
    fn set_processing(&mut self, busy: bool);
    fn set_input_error(&mut self, visible: bool);
    fn insert_notification(&mut self, id: NotificationId, message: &str, severity: Severity);
    fn set_notification_opacity(&mut self, id: NotificationId, opacity: f32);
    fn remove_notification(&mut self, id: NotificationId);
    fn insert_card(&mut self, id: CardId, card: &CardView);
    fn animate_card_in(&mut self, id: CardId);
    fn set_card_thumbnail(&mut self, id: CardId, url: &str);
    fn fade_card(&mut self, id: CardId);
    fn remove_card(&mut self, id: CardId);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputControl {
    pub value: String,
    pub border_bottom: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriggerControl {
    pub disabled: bool,
    pub classes: BTreeSet<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphControl {
    pub text: &'static str,
    pub classes: BTreeSet<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub id: CardId,
    pub container_classes: BTreeSet<&'static str>,
    pub card_classes: BTreeSet<&'static str>,
    pub thumbnail_src: String,
    pub title: String,
    pub duration: String,
    pub uploader: String,
    pub summary_html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationNode {
    pub id: NotificationId,
    pub message: String,
    pub class: String,
    pub background: &'static str,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Section { class: &'static str },
    Card(CardNode),
    Notification(NotificationNode),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiTree {
    pub input: Option<InputControl>,
    pub trigger: Option<TriggerControl>,
    pub glyph: Option<GlyphControl>,
    pub body: Vec<Node>,
}

impl UiTree {
    /// Checks that the controls the controller drives are present.
    pub fn wire(&self) -> Result<(), WiringError> {
        if self.input.is_none() {
            return Err(WiringError::MissingInput);
        }
        if self.trigger.is_none() {
            return Err(WiringError::MissingTrigger);
        }
        if self.glyph.is_none() {
            scroll_warn!("Status glyph missing; busy state will not be shown on it");
        }
        Ok(())
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardNode> {
        self.body.iter().filter_map(|node| match node {
            Node::Card(card) => Some(card),
            _ => None,
        })
    }

    pub fn notifications(&self) -> impl Iterator<Item = &NotificationNode> {
        self.body.iter().filter_map(|node| match node {
            Node::Notification(notification) => Some(notification),
            _ => None,
        })
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut CardNode> {
        self.body.iter_mut().find_map(|node| match node {
            Node::Card(card) if card.id == id => Some(card),
            _ => None,
        })
    }

    fn notification_mut(&mut self, id: NotificationId) -> Option<&mut NotificationNode> {
        self.body.iter_mut().find_map(|node| match node {
            Node::Notification(notification) if notification.id == id => Some(notification),
            _ => None,
        })
    }

    fn anchor_index(&self) -> Option<usize> {
        self.body.iter().position(
            |node| matches!(node, Node::Section { class } if *class == ANCHOR_SECTION_CLASS),
        )
    }
}

impl Interface for UiTree {
    fn set_processing(&mut self, busy: bool) {
        if let Some(trigger) = self.trigger.as_mut() {
            trigger.disabled = busy;
            if busy {
                trigger.classes.insert(CLASS_LOADING);
            } else {
                trigger.classes.remove(CLASS_LOADING);
            }
        }
        if let Some(glyph) = self.glyph.as_mut() {
            if busy {
                glyph.text = GLYPH_BUSY;
                glyph.classes.insert(CLASS_SPINNING);
            } else {
                glyph.text = GLYPH_IDLE;
                glyph.classes.remove(CLASS_SPINNING);
            }
        }
    }

    fn set_input_error(&mut self, visible: bool) {
        if let Some(input) = self.input.as_mut() {
            input.border_bottom = visible.then_some(INPUT_ERROR_BORDER);
        }
    }

    fn insert_notification(&mut self, id: NotificationId, message: &str, severity: Severity) {
        self.body.push(Node::Notification(NotificationNode {
            id,
            message: message.to_string(),
            class: format!("feedback-message feedback-{}", severity.as_str()),
            background: severity.background(),
            opacity: 0.0,
        }));
    }

    fn set_notification_opacity(&mut self, id: NotificationId, opacity: f32) {
        if let Some(notification) = self.notification_mut(id) {
            notification.opacity = opacity;
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.body
            .retain(|node| !matches!(node, Node::Notification(n) if n.id == id));
    }

    fn insert_card(&mut self, id: CardId, card: &CardView) {
        let node = Node::Card(CardNode {
            id,
            container_classes: BTreeSet::from([CLASS_CARD_CONTAINER]),
            card_classes: BTreeSet::from([CLASS_CARD]),
            thumbnail_src: card.thumbnail_url.clone(),
            title: card.title.clone(),
            duration: card.duration.clone(),
            uploader: card.uploader_label.clone(),
            summary_html: card.summary_html.clone(),
        });
        match self.anchor_index() {
            Some(index) => self.body.insert(index + 1, node),
            None => {
                scroll_warn!("Anchor section missing; appending card to the end");
                self.body.push(node);
            }
        }
    }

    fn animate_card_in(&mut self, id: CardId) {
        if let Some(card) = self.card_mut(id) {
            card.container_classes.insert(CLASS_SHOW);
            card.card_classes.insert(CLASS_ANIMATE_IN);
        }
    }

    fn set_card_thumbnail(&mut self, id: CardId, url: &str) {
        if let Some(card) = self.card_mut(id) {
            card.thumbnail_src = url.to_string();
        }
    }

    fn fade_card(&mut self, id: CardId) {
        if let Some(card) = self.card_mut(id) {
            card.container_classes.insert(CLASS_FADE_OUT);
        }
    }

    fn remove_card(&mut self, id: CardId) {
        self.body
            .retain(|node| !matches!(node, Node::Card(card) if card.id == id));
    }
}
