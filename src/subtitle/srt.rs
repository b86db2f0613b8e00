// SRT subtitle format
use super::timestamp::{format_timestamp, TimestampStyle};
use super::{echo_cue, Segment, SubtitleFormatter};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct SrtFormatter {
    /// Echo every cue to the log stream as it is written.
    pub echo_cues: bool,
}

impl SubtitleFormatter for SrtFormatter {
    fn format(&self, segments: &[Segment]) -> Result<String> {
        let mut output = String::new();

        for (i, segment) in segments.iter().enumerate() {
            let start = format_timestamp(segment.start, TimestampStyle::Comma)?;
            let end = format_timestamp(segment.end, TimestampStyle::Comma)?;
            let text = segment.text.trim();

            output.push_str(&format!("{}\n{} --> {}\n{}\n\n", i + 1, start, end, text));

            if self.echo_cues {
                echo_cue(&start, &end, text);
            }
        }

        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "srt"
    }
}
