use std::collections::BTreeSet;

use super::constants::*;
use super::tree::{GlyphControl, InputControl, Node, TriggerControl, UiTree};

/// Page skeleton: hero, the URL input section the card is anchored to, footer.
pub fn initial_tree() -> UiTree {
    UiTree {
        input: Some(InputControl::default()),
        trigger: Some(TriggerControl::default()),
        glyph: Some(GlyphControl {
            text: GLYPH_IDLE,
            classes: BTreeSet::from(["arrow"]),
        }),
        body: vec![
            Node::Section { class: "hero" },
            Node::Section {
                class: ANCHOR_SECTION_CLASS,
            },
            Node::Section { class: "footer" },
        ],
    }
}
