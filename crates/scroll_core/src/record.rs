/// Metadata for one processed video, as handed over by the service adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    /// Human readable duration, already formatted by the service.
    pub duration: String,
    pub uploader: String,
    pub thumbnail_url: String,
    /// May contain `**bold**` spans, marker emoji and line breaks.
    pub summary: String,
}
