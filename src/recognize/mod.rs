pub mod command;
pub mod segments_file;

pub use command::CommandRecognizer;
pub use segments_file::{parse_segments_json, SegmentFileRecognizer};

use crate::config::{ComputeProfile, Config};
use crate::error::Result;
use crate::subtitle::Segment;
use async_trait::async_trait;
use std::path::Path;

/// Fixed settings passed to the speech recognition model for every file.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOptions {
    /// Spoken-language hint (ISO 639-1).
    pub language: String,
    /// Priming prompt that nudges the model toward punctuated output.
    pub initial_prompt: String,
    pub beam_size: u32,
    pub model: String,
    pub compute: ComputeProfile,
}

impl RecognitionOptions {
    pub fn from_config(config: &Config, compute: ComputeProfile) -> Self {
        Self {
            language: config.language.clone(),
            initial_prompt: config.initial_prompt.clone(),
            beam_size: config.beam_size,
            model: config.model.clone(),
            compute,
        }
    }
}

/// Produces timed segments for a media file, ordered by start time.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn produce_segments(
        &self,
        media: &Path,
        options: &RecognitionOptions,
    ) -> Result<Vec<Segment>>;
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Device, Precision};

    #[test]
    fn test_options_from_default_config() {
        let compute = ComputeProfile {
            device: Device::Cpu,
            precision: Precision::Int8,
        };
        let options = RecognitionOptions::from_config(&Config::default(), compute);

        assert_eq!(options.language, "he");
        assert_eq!(options.beam_size, 5);
        assert_eq!(options.model, "large-v2");
        assert!(options.initial_prompt.contains("punctuation"));
        assert_eq!(options.compute, compute);
    }
}
