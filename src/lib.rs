pub mod config;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod recognize;
pub mod subtitle;

pub use config::{ComputeProfile, Config, SubtitleFormat};
pub use error::{HebscribeError, Result};
pub use normalize::{normalize_text, TextNormalizer};
pub use pipeline::{
    normalize_file, print_summary, PipelineConfig, PipelineResult, PipelineStats,
    TranscriptionPipeline,
};
pub use subtitle::Segment;
