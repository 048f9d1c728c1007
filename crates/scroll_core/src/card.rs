use std::sync::LazyLock;

use regex::Regex;
use scroll_logging::{scroll_debug, scroll_info};

use crate::{Effect, TimerEvent, Timings, VideoRecord};

// Bold never spans a line terminator, `\r` and the Unicode separators included.
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\n\r\u{2028}\u{2029}]*?)\*\*").expect("bold pattern is valid")
});

static MARKER_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("📹|⏱️|📝").expect("emoji pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u64);

/// Rendered form of a [`VideoRecord`]. Text fields are plain text;
/// `summary_html` is markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub video_id: String,
    pub thumbnail_url: String,
    pub title: String,
    pub duration: String,
    pub uploader_label: String,
    pub summary_html: String,
}

impl CardView {
    pub fn from_record(record: VideoRecord) -> Self {
        Self {
            summary_html: format_summary(&record.summary),
            uploader_label: format!("by {}", record.uploader),
            thumbnail_url: record.thumbnail_url,
            title: record.title,
            duration: record.duration,
            video_id: record.video_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Attached, waiting for layout before animating in.
    Pending,
    Shown,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSnapshot {
    pub id: CardId,
    pub card: CardView,
    pub phase: CardPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LiveCard {
    id: CardId,
    card: CardView,
    phase: CardPhase,
    used_fallback: bool,
}

/// Single-slot result card: rendering a record replaces whatever card is up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRenderer {
    current: Option<LiveCard>,
    next_id: u64,
}

impl ResultRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, record: VideoRecord, timings: &Timings) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(3);
        if let Some(previous) = self.current.take() {
            scroll_debug!("Replacing card {:?}", previous.id);
            effects.push(Effect::RemoveCard { id: previous.id });
        }

        self.next_id += 1;
        let id = CardId(self.next_id);
        let card = CardView::from_record(record);
        scroll_info!("Rendering card {:?} for video {}", id, card.video_id);

        effects.push(Effect::InsertCard {
            id,
            card: card.clone(),
        });
        effects.push(Effect::ScheduleTimer {
            delay: timings.card_animate_delay,
            event: TimerEvent::AnimateCard(id),
        });

        self.current = Some(LiveCard {
            id,
            card,
            phase: CardPhase::Pending,
            used_fallback: false,
        });
        effects
    }

    /// Close control clicked. Stale ids and repeated clicks are ignored.
    pub fn dismiss(&mut self, id: CardId, timings: &Timings) -> Vec<Effect> {
        match self.current.as_mut() {
            Some(live) if live.id == id && live.phase != CardPhase::FadingOut => {
                live.phase = CardPhase::FadingOut;
                vec![
                    Effect::FadeCard { id },
                    Effect::ScheduleTimer {
                        delay: timings.card_fade,
                        event: TimerEvent::RemoveCard(id),
                    },
                ]
            }
            _ => Vec::new(),
        }
    }

    /// Primary thumbnail failed to load; switch to the id-derived one once.
    pub fn thumbnail_failed(&mut self, id: CardId) -> Vec<Effect> {
        match self.current.as_mut() {
            Some(live) if live.id == id && !live.used_fallback => {
                live.used_fallback = true;
                let url = fallback_thumbnail_url(&live.card.video_id);
                live.card.thumbnail_url = url.clone();
                vec![Effect::SetCardThumbnail { id, url }]
            }
            _ => Vec::new(),
        }
    }

    pub fn on_timer(&mut self, event: TimerEvent) -> Vec<Effect> {
        let Some(live) = self.current.as_mut() else {
            return Vec::new();
        };

        match event {
            TimerEvent::AnimateCard(id) if id == live.id && live.phase == CardPhase::Pending => {
                live.phase = CardPhase::Shown;
                vec![Effect::AnimateCardIn { id }]
            }
            TimerEvent::RemoveCard(id) if id == live.id && live.phase == CardPhase::FadingOut => {
                self.current = None;
                vec![Effect::RemoveCard { id }]
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> Option<CardSnapshot> {
        self.current.as_ref().map(|live| CardSnapshot {
            id: live.id,
            card: live.card.clone(),
            phase: live.phase,
        })
    }
}

/// Standard high-quality default thumbnail for a video id.
pub fn fallback_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

/// Converts summary text to card markup: bold spans first, then marker
/// emoji, then line breaks.
pub fn format_summary(summary: &str) -> String {
    let bold = BOLD.replace_all(summary, "<strong>$1</strong>");
    let marked = MARKER_EMOJI.replace_all(&bold, r#"<span class="emoji">$0</span>"#);
    marked.replace('\n', "<br>")
}
