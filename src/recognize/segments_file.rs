use super::{RecognitionOptions, Recognizer};
use crate::error::{HebscribeError, Result};
use crate::subtitle::Segment;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Segment JSON as written by recognizers: a bare array, or an object with a
/// `segments` array (the verbose transcription response shape).
#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentsPayload {
    List(Vec<Segment>),
    Wrapped { segments: Vec<Segment> },
}

/// Parse recognizer segment JSON. Unknown per-segment fields are ignored.
pub fn parse_segments_json(content: &str) -> Result<Vec<Segment>> {
    let payload: SegmentsPayload = serde_json::from_str(content)?;
    Ok(match payload {
        SegmentsPayload::List(segments) => segments,
        SegmentsPayload::Wrapped { segments } => segments,
    })
}

/// Reads segments that an offline recognition run already produced.
pub struct SegmentFileRecognizer {
    path: PathBuf,
}

impl SegmentFileRecognizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Recognizer for SegmentFileRecognizer {
    async fn produce_segments(
        &self,
        media: &Path,
        _options: &RecognitionOptions,
    ) -> Result<Vec<Segment>> {
        if !self.path.exists() {
            return Err(HebscribeError::FileNotFound(self.path.display().to_string()));
        }

        debug!(
            "Reading segments for {} from {}",
            media.display(),
            self.path.display()
        );

        let content = fs::read_to_string(&self.path).await?;
        parse_segments_json(&content).map_err(|e| {
            HebscribeError::Recognition(format!(
                "invalid segments file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn name(&self) -> &'static str {
        "segments file"
    }
}
