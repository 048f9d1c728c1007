use scroll_core::{AppViewModel, SubmissionState};

use super::tree::{CardNode, UiTree};

/// Text rendering of the tree for the terminal host, one line per element.
pub fn render(tree: &UiTree, view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let glyph = tree.glyph.as_ref().map_or("", |glyph| glyph.text);
    let state = match view.submission {
        SubmissionState::Idle => "ready",
        SubmissionState::Processing => "processing",
    };
    let input_marker = if view.input_error { " (invalid)" } else { "" };
    lines.push(format!("[{glyph}] {state}{input_marker}"));

    for card in tree.cards() {
        lines.extend(render_card(card));
    }
    // Transparent notifications are attached but not yet (or no longer) seen.
    for notification in tree.notifications().filter(|n| n.opacity > 0.0) {
        lines.push(format!("<{}> {}", notification.class, notification.message));
    }

    lines
}

fn render_card(card: &CardNode) -> Vec<String> {
    let classes: Vec<_> = card.container_classes.iter().copied().collect();
    vec![
        format!("┌ card #{} [{}]", card.id.0, classes.join(" ")),
        format!("│ {} ({}) {}", card.title, card.duration, card.uploader),
        format!("│ thumbnail: {}", card.thumbnail_src),
        format!("│ {}", card.summary_html),
        "└ type :close to dismiss".to_string(),
    ]
}
