//! WebVTT to SRT conversion
//!
//! Rewrites the cue tracks yt-dlp downloads (WEBVTT header, period-separated
//! timestamps, inline styling tags) into numbered SubRip blocks. The pass is
//! line-based and never fails: lines that do not look like cue content are
//! dropped, so malformed input degrades to fewer cues, not an error.

/// Header and metadata prefixes that are recognized and discarded.
const HEADER_PREFIXES: [&str; 3] = ["WEBVTT", "Kind:", "Language:"];

/// Inline styling tags removed from cue text by literal substring match.
/// Other tags (different color codes, `<b>`, karaoke timing) pass through.
const INLINE_TAGS: [&str; 4] = ["<c>", "</c>", "<c.colorCCCCCC>", "<c.colorE5E5E5>"];

/// Convert a WebVTT-family caption track to SRT text.
///
/// Single forward pass with one piece of rolling state: the timing line of
/// the cue currently being assembled. A cue is emitted when the first
/// non-empty text line after its timing line arrives; further text lines
/// belong to no cue and are ignored, as is a timing line that never gets a
/// text line. Output blocks are numbered from 1 with no gaps.
///
/// Returns an empty string when no cues were recognized. Callers treat an
/// empty or whitespace-only result as "no usable captions".
pub fn vtt_to_srt(raw: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut counter: usize = 1;
    let mut pending_timing: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();

        if HEADER_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        if line.contains("-->") {
            // A malformed timing line clears the pending cue instead of
            // starting one, so stray text cannot attach to a stale timestamp.
            pending_timing = rewrite_timing_line(line);
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let Some(timing) = pending_timing.take() {
            blocks.push(counter.to_string());
            blocks.push(timing);
            blocks.push(strip_inline_tags(line));
            blocks.push(String::new());
            counter += 1;
        }
    }

    blocks.join("\n")
}

/// Rewrite a timing line to SRT form: `start --> end` with comma separators
/// and any trailing cue-settings tokens dropped.
///
/// The period substitution is applied to the whole line before tokenizing,
/// matching the converter's documented byte-level behavior. Returns `None`
/// when the line has fewer than three whitespace-delimited tokens.
fn rewrite_timing_line(line: &str) -> Option<String> {
    let converted = line.replace('.', ",");
    let mut tokens = converted.split_whitespace();
    let start = tokens.next()?;
    let _arrow = tokens.next()?;
    let end = tokens.next()?;
    Some(format!("{} --> {}", start, end))
}

/// Remove the recognized inline styling tags from a cue text line.
fn strip_inline_tags(line: &str) -> String {
    let mut text = line.to_string();
    for tag in INLINE_TAGS {
        text = text.replace(tag, "");
    }
    text
}
