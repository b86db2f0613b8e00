// WebVTT subtitle format
use super::timestamp::{format_timestamp, TimestampStyle};
use super::{echo_cue, Segment, SubtitleFormatter};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct VttFormatter {
    /// Echo every cue to the log stream as it is written.
    pub echo_cues: bool,
}

impl SubtitleFormatter for VttFormatter {
    fn format(&self, segments: &[Segment]) -> Result<String> {
        let mut output = String::from("WEBVTT\n\n");

        for segment in segments {
            let start = format_timestamp(segment.start, TimestampStyle::Dot)?;
            let end = format_timestamp(segment.end, TimestampStyle::Dot)?;

            // Cue text is written as recognized, surrounding whitespace included.
            output.push_str(&format!("{} --> {}\n{}\n\n", start, end, segment.text));

            if self.echo_cues {
                echo_cue(&start, &end, &segment.text);
            }
        }

        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "vtt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtt_format() {
        let output = VttFormatter::default()
            .format(&[Segment::new(0.0, 1.5, "hello")])
            .unwrap();

        assert!(output.starts_with("WEBVTT\n\n00:00:00.000 --> 00:00:01.500\nhello\n\n"));
    }

    #[test]
    fn test_vtt_keeps_untrimmed_text() {
        let output = VttFormatter::default()
            .format(&[Segment::new(3661.1234, 3662.0, " בראשית ברא ")])
            .unwrap();

        assert_eq!(
            output,
            "WEBVTT\n\n01:01:01.123 --> 01:01:02.000\n בראשית ברא \n\n"
        );
    }

    #[test]
    fn test_empty_document_has_header() {
        assert_eq!(VttFormatter::default().format(&[]).unwrap(), "WEBVTT\n\n");
    }
}
