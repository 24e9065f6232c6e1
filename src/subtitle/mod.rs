//! Subtitle conversion module
//!
//! This module converts WebVTT-family caption tracks to SubRip text:
//! - Header and metadata line recognition
//! - Timing line rewrite to SRT timestamps
//! - Inline styling tag removal
//! - Cue numbering and block assembly

pub mod convert;

pub use convert::vtt_to_srt;
