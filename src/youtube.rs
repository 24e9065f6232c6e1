//! YouTube video id and URL handling

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Extract the eleven-character video id from a YouTube URL.
///
/// Recognizes watch pages, `youtu.be` short links, and embed / shorts /
/// legacy `/v/` paths. Returns `None` for anything else.
pub fn video_id_from_url(url: &str) -> Option<String> {
    // Watch pages, with the id anywhere in the query string.
    if let Some(caps) = regex!(r"youtube\.com/watch\?(?:.*&)?v=([A-Za-z0-9_-]{11})").captures(url) {
        return Some(caps[1].to_string());
    }

    // Short links.
    if let Some(caps) = regex!(r"youtu\.be/([A-Za-z0-9_-]{11})").captures(url) {
        return Some(caps[1].to_string());
    }

    // Embed, shorts and legacy /v/ paths.
    if let Some(caps) = regex!(r"youtube\.com/(?:embed|shorts|v)/([A-Za-z0-9_-]{11})").captures(url)
    {
        return Some(caps[1].to_string());
    }

    None
}

/// Normalize a client-supplied video reference to a bare id.
///
/// Bare ids pass through verbatim. URL shapes have the id extracted; a
/// URL-looking value with no recognizable id also passes through unchanged
/// so the extraction tool is the one that rejects it, keeping the failure
/// taxonomy in one place.
pub fn normalize_video_id(value: &str) -> String {
    let value = value.trim();
    if looks_like_url(value) {
        if let Some(id) = video_id_from_url(value) {
            return id;
        }
    }
    value.to_string()
}

/// Canonical watch URL handed to the extraction tool.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

// helper.
fn looks_like_url(value: &str) -> bool {
    value.contains("://") || value.contains("youtube.com/") || value.contains("youtu.be/")
}
