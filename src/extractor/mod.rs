//! Caption extraction orchestration
//!
//! The flow for one video:
//! - normalize the supplied id and build the canonical watch URL
//! - probe metadata and check the requested language is offered
//! - download the caption track into a scratch directory
//! - convert WebVTT to SRT and reject empty output

mod ytdlp;

pub use ytdlp::{TrackFormat, VideoInfo, YtDlp};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ExtractorConfig;
use crate::error::{CaptionsError, Result};
use crate::subtitle;
use crate::youtube;

/// One finished extraction: everything the API reports for a video.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub video_id: String,
    pub video_title: String,
    pub language: String,
    pub srt_content: String,
    /// UTF-8 byte length of `srt_content`.
    pub size: usize,
    /// Name of the tool that produced the track.
    pub method: &'static str,
}

/// Fetch the caption track for one video and convert it to SRT.
pub async fn extract_captions(
    config: &ExtractorConfig,
    video_id: &str,
    language: &str,
) -> Result<Extraction> {
    let video_id = youtube::normalize_video_id(video_id);
    let url = youtube::watch_url(&video_id);
    info!("Extracting {} captions for video {}", language, video_id);

    let workdir = tempfile::tempdir()?;
    let ytdlp = YtDlp::new(config);

    let probe = ytdlp.probe(&url).await?;
    let video_title = probe
        .title
        .clone()
        .unwrap_or_else(|| format!("Video {}", video_id));
    if !probe.has_language(language) {
        return Err(CaptionsError::LanguageUnavailable {
            language: language.to_string(),
            available: probe.available_languages(),
        });
    }

    ytdlp.download_track(&url, language, workdir.path()).await?;

    let track_path =
        find_track_file(workdir.path(), language)?.ok_or(CaptionsError::TrackFileMissing)?;
    debug!("Converting {}", track_path.display());
    let raw_track = tokio::fs::read_to_string(&track_path).await?;

    let srt_content = subtitle::vtt_to_srt(&raw_track);
    if srt_content.trim().is_empty() {
        return Err(CaptionsError::EmptyConversion);
    }

    info!(
        "Extracted {} bytes of SRT for video {} ({})",
        srt_content.len(),
        video_id,
        video_title
    );
    Ok(Extraction {
        video_id,
        video_title,
        language: language.to_string(),
        size: srt_content.len(),
        srt_content,
        method: "yt-dlp",
    })
}

/// Locate the downloaded `.<language>.vtt` file in the scratch directory.
pub(crate) fn find_track_file(dir: &Path, language: &str) -> Result<Option<PathBuf>> {
    let suffix = format!(".{}.vtt", language);
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}
