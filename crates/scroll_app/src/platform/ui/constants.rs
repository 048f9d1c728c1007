pub const ANCHOR_SECTION_CLASS: &str = "youtube-section";

pub const GLYPH_IDLE: &str = "→";
pub const GLYPH_BUSY: &str = "⟳";

pub const CLASS_LOADING: &str = "loading";
pub const CLASS_SPINNING: &str = "spinning";

pub const CLASS_CARD_CONTAINER: &str = "video-display";
pub const CLASS_CARD: &str = "video-card";
pub const CLASS_SHOW: &str = "show";
pub const CLASS_ANIMATE_IN: &str = "animate-in";
pub const CLASS_FADE_OUT: &str = "fade-out";

pub const INPUT_ERROR_BORDER: &str = "2px solid #ef4444";
