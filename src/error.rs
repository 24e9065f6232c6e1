use thiserror::Error;

/// Main error type for the captions server
#[derive(Error, Debug)]
pub enum CaptionsError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("No subtitles available in language: {language}")]
    LanguageUnavailable {
        language: String,
        available: Vec<String>,
    },

    #[error("No subtitles available for this video: {0}")]
    NoCaptions(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Extraction tool timed out after {0}s")]
    Timeout(u64),

    #[error("Subtitle file not found after download")]
    TrackFileMissing,

    #[error("Empty subtitle content after conversion")]
    EmptyConversion,

    #[error("Metadata parse error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CaptionsError {
    /// Whether the caller should try an alternative caption source.
    /// Validation failures are the caller's fault and get no hint.
    pub fn fallback_recommended(&self) -> bool {
        !matches!(
            self,
            CaptionsError::MissingField(_)
                | CaptionsError::InvalidRequest(_)
                | CaptionsError::Config(_)
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CaptionsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CaptionsError::MissingField("videoId").to_string(),
            "videoId is required"
        );
        assert_eq!(
            CaptionsError::LanguageUnavailable {
                language: "fr".to_string(),
                available: vec!["en".to_string()],
            }
            .to_string(),
            "No subtitles available in language: fr"
        );
        assert_eq!(
            CaptionsError::TrackFileMissing.to_string(),
            "Subtitle file not found after download"
        );
        assert_eq!(
            CaptionsError::EmptyConversion.to_string(),
            "Empty subtitle content after conversion"
        );
    }

    #[test]
    fn test_fallback_hint() {
        assert!(!CaptionsError::MissingField("videoId").fallback_recommended());
        assert!(!CaptionsError::InvalidRequest("videoIds must be an array".into())
            .fallback_recommended());
        assert!(CaptionsError::NoCaptions("no subtitles".into()).fallback_recommended());
        assert!(CaptionsError::Extraction("network down".into()).fallback_recommended());
        assert!(CaptionsError::EmptyConversion.fallback_recommended());
        assert!(CaptionsError::Timeout(120).fallback_recommended());
    }
}
