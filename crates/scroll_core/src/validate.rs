use std::sync::LazyLock;

use regex::Regex;

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/|v/)|youtu\.be/)[A-Za-z0-9_-]+")
        .expect("video url pattern is valid")
});

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([^&\n?#]+)")
        .expect("video id pattern is valid")
});

/// Returns true when `input` looks like a link to a single hosted video.
///
/// Leading and trailing whitespace is ignored and anything after the video
/// identifier is tolerated.
pub fn is_valid_video_url(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && VIDEO_URL.is_match(trimmed)
}

/// Extracts the video identifier from a watch, embed, `/v/` or short link.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}
