// Reading SRT/VTT documents back into segments
use super::timestamp::clock_to_seconds;
use super::Segment;
use crate::error::{HebscribeError, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

/// `start --> end` timing line, hours optional, `,` or `.` before milliseconds.
static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(\d+):)?(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(?:(\d+):)?(\d{2}):(\d{2})[,.](\d{3})",
    )
    .expect("Invalid timing line regex")
});

/// Parse the cues of an SRT or WebVTT document.
///
/// Blocks without a timing line (the `WEBVTT` header, `NOTE` and `STYLE`
/// blocks) are skipped. Cue indices and cue settings after the end time are
/// ignored. Multi-line cue text is joined with `\n`.
pub fn parse_cues(content: &str) -> Result<Vec<Segment>> {
    let content = content.replace("\r\n", "\n");
    let mut segments = Vec::new();

    for block in content.split("\n\n") {
        let lines: Vec<&str> = block.lines().collect();

        let Some(timing_idx) = lines.iter().position(|l| TIMING_LINE.is_match(l)) else {
            if !block.trim().is_empty() {
                debug!("Skipping block without timing line: {:?}", block.lines().next());
            }
            continue;
        };

        let caps = TIMING_LINE
            .captures(lines[timing_idx])
            .ok_or_else(|| HebscribeError::Parse(lines[timing_idx].to_string()))?;

        let start = capture_seconds(&caps, 1)?;
        let end = capture_seconds(&caps, 5)?;
        let text = lines[timing_idx + 1..].join("\n");

        segments.push(Segment { start, end, text });
    }

    Ok(segments)
}

fn capture_seconds(caps: &Captures<'_>, first: usize) -> Result<f64> {
    let field = |i: usize| -> Result<u64> {
        match caps.get(first + i) {
            Some(m) => m.as_str().parse().map_err(|e| {
                HebscribeError::Parse(format!("bad timestamp field '{}': {e}", m.as_str()))
            }),
            None => Ok(0),
        }
    };

    Ok(clock_to_seconds(field(0)?, field(1)?, field(2)?, field(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_srt() {
        let srt = "1\n00:00:00,000 --> 00:00:01,500\nhello\n\n\
                   2\n00:00:02,250 --> 00:00:04,000\nfirst line\nsecond line\n\n";

        let segments = parse_cues(srt).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new(0.0, 1.5, "hello"));
        assert_eq!(segments[1].start, 2.25);
        assert_eq!(segments[1].text, "first line\nsecond line");
    }

    #[test]
    fn test_parse_vtt_with_header_and_note() {
        let vtt = "WEBVTT\n\nNOTE produced offline\n\n\
                   01:01:01.123 --> 01:01:02.000 align:start\nשלום\n\n\
                   00:05.000 --> 00:06.000\nshort form\n\n";

        let segments = parse_cues(vtt).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].end, 3662.0);
        assert_eq!(segments[0].text, "שלום");
        assert_eq!(segments[1].start, 5.0);
    }

    #[test]
    fn test_parse_crlf() {
        let srt = "1\r\n00:00:01,000 --> 00:00:02,000\r\nwindows\r\n\r\n";
        let segments = parse_cues(srt).unwrap();
        assert_eq!(segments, vec![Segment::new(1.0, 2.0, "windows")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_cues("").unwrap().is_empty());
        assert!(parse_cues("WEBVTT\n\n").unwrap().is_empty());
    }
}
