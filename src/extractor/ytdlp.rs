//! yt-dlp process invocation
//!
//! All tool calls run as child processes with a configured timeout. Failures
//! are classified by stderr content so "this video has no subtitles" is
//! distinguishable from the tool blowing up.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Output;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::error::{CaptionsError, Result};

/// Video metadata reported by the probe, reduced to what the extraction
/// flow needs. Caption maps go from language code to the track formats
/// offered for it, keyed in code order rather than the tool's listing
/// order.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub subtitles: BTreeMap<String, Vec<TrackFormat>>,
    #[serde(default)]
    pub automatic_captions: BTreeMap<String, Vec<TrackFormat>>,
}

/// One downloadable caption track format.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackFormat {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl VideoInfo {
    /// Whether a caption track exists for the language, manual or automatic.
    pub fn has_language(&self, language: &str) -> bool {
        self.subtitles.contains_key(language) || self.automatic_captions.contains_key(language)
    }

    /// All reported language codes, manual listings first, each group
    /// sorted by code.
    pub fn available_languages(&self) -> Vec<String> {
        self.subtitles
            .keys()
            .chain(self.automatic_captions.keys())
            .cloned()
            .collect()
    }
}

/// Thin wrapper around the yt-dlp executable.
pub struct YtDlp {
    bin: String,
    timeout: Duration,
}

impl YtDlp {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            bin: config.bin_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Report the installed tool version, or `None` when the tool cannot
    /// be run at all.
    pub async fn version(&self) -> Option<String> {
        let output = Command::new(&self.bin)
            .arg("--version")
            .kill_on_drop(true)
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!version.is_empty()).then_some(version)
    }

    /// Fetch video metadata without downloading anything.
    pub async fn probe(&self, url: &str) -> Result<VideoInfo> {
        let output = self
            .run(&["--dump-single-json", "--skip-download", "--no-warnings", url])
            .await?;
        let info: VideoInfo = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }

    /// Download the caption track for one language into `dir` as WebVTT.
    /// The file lands as `<video id>.<language>.vtt`.
    pub async fn download_track(&self, url: &str, language: &str, dir: &Path) -> Result<()> {
        let template = dir.join("%(id)s.%(ext)s");
        let template = template.to_string_lossy();
        self.run(&[
            "--skip-download",
            "--write-sub",
            "--write-auto-sub",
            "--sub-langs",
            language,
            "--sub-format",
            "vtt",
            "-o",
            &template,
            "--no-warnings",
            url,
        ])
        .await?;
        Ok(())
    }

    /// Run the tool with the given arguments under the configured timeout.
    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("Running {} {}", self.bin, args.join(" "));

        let result = tokio::time::timeout(
            self.timeout,
            Command::new(&self.bin)
                .args(args)
                .kill_on_drop(true)
                .output(),
        )
        .await;

        let output = match result {
            Ok(io_result) => io_result?,
            Err(_) => return Err(CaptionsError::Timeout(self.timeout.as_secs())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim().to_string();
            let message = if message.is_empty() {
                output.status.to_string()
            } else {
                message
            };
            warn!("yt-dlp exited with {}: {}", output.status, message);
            return Err(classify_failure(message));
        }

        Ok(output)
    }
}

/// Sort a tool failure into the caption-missing vs general-failure buckets.
/// yt-dlp mentions subtitles or captions in its message when the video has
/// none in the requested language.
fn classify_failure(message: String) -> CaptionsError {
    let lowered = message.to_lowercase();
    if lowered.contains("subtitle") || lowered.contains("caption") {
        CaptionsError::NoCaptions(message)
    } else {
        CaptionsError::Extraction(message)
    }
}
