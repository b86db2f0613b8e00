pub mod parse;
pub mod srt;
pub mod timestamp;
pub mod vtt;

use crate::config::SubtitleFormat;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use parse::parse_cues;
pub use timestamp::{format_timestamp, TimestampStyle};

/// One unit of recognized speech, offsets in seconds from media start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

pub trait SubtitleFormatter {
    /// Render a complete subtitle document. Segment order is preserved as given.
    fn format(&self, segments: &[Segment]) -> Result<String>;
    fn extension(&self) -> &'static str;
}

pub fn create_formatter(format: SubtitleFormat, echo_cues: bool) -> Box<dyn SubtitleFormatter> {
    match format {
        SubtitleFormat::Srt => Box::new(srt::SrtFormatter { echo_cues }),
        SubtitleFormat::Vtt => Box::new(vtt::VttFormatter { echo_cues }),
    }
}

/// `[start --> end] text`
pub fn cue_echo_line(start: &str, end: &str, text: &str) -> String {
    format!("[{} --> {}] {}", start, end, text)
}

/// Log a cue to the `hebscribe::cue` target as it is written.
pub(crate) fn echo_cue(start: &str, end: &str, text: &str) {
    tracing::info!(target: "hebscribe::cue", "{}", cue_echo_line(start, end, text));
}
