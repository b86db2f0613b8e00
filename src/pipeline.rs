use crate::config::{ComputeProfile, Config, SubtitleFormat};
use crate::error::{HebscribeError, Result};
use crate::normalize::{NormalizerConfig, TextNormalizer};
use crate::output::{derive_output_path, write_atomic};
use crate::recognize::{RecognitionOptions, Recognizer};
use crate::subtitle::{create_formatter, parse_cues, Segment};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Configuration for one transcription run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Settings handed to the recognizer.
    pub options: RecognitionOptions,
    /// Where output files go; defaults to the media file's directory.
    pub output_dir: Option<PathBuf>,
    /// Also write a normalized `.txt` transcript.
    pub transcript: bool,
    /// Joins segment texts before normalization.
    pub transcript_separator: String,
    pub normalize: NormalizerConfig,
    /// Echo each cue to the log as it is formatted.
    pub echo_cues: bool,
    /// Show a spinner while the recognizer runs.
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default(), ComputeProfile::default())
    }
}

impl PipelineConfig {
    pub fn from_config(config: &Config, compute: ComputeProfile) -> Self {
        Self {
            options: RecognitionOptions::from_config(config, compute),
            output_dir: None,
            transcript: false,
            transcript_separator: config.transcript_separator.clone(),
            normalize: config.normalize.clone(),
            echo_cues: true,
            show_progress: true,
        }
    }
}

/// Statistics from one run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub total_time: Duration,
    pub recognition_time: Duration,
    pub cues: usize,
    /// Media duration as seen by the recognizer (end of the last segment).
    pub media_duration: f64,
    pub recognizer: String,
}

/// Files produced by one run.
#[derive(Debug)]
pub struct PipelineResult {
    pub subtitle_path: PathBuf,
    pub transcript_path: Option<PathBuf>,
    pub format: SubtitleFormat,
    pub stats: PipelineStats,
}

/// Routes recognizer output to the subtitle writer and the text normalizer.
pub struct TranscriptionPipeline {
    recognizer: Box<dyn Recognizer>,
    normalizer: TextNormalizer,
    config: PipelineConfig,
}

impl TranscriptionPipeline {
    pub fn new(recognizer: Box<dyn Recognizer>, config: PipelineConfig) -> Result<Self> {
        let normalizer = TextNormalizer::new(&config.normalize)?;
        Ok(Self {
            recognizer,
            normalizer,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Transcribe `media` and write `<stem>.<format>` (plus `<stem>.txt` when
    /// transcripts are enabled). `format` is validated before anything runs.
    pub async fn run(&self, media: &Path, format: &str) -> Result<PipelineResult> {
        let format: SubtitleFormat = format.parse()?;
        self.run_format(media, format).await
    }

    pub async fn run_format(&self, media: &Path, format: SubtitleFormat) -> Result<PipelineResult> {
        let start_time = Instant::now();

        info!(
            "Recognizing {} with {} (language: {}, beam: {})",
            media.display(),
            self.recognizer.name(),
            self.config.options.language,
            self.config.options.beam_size
        );

        let spinner = self.config.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Recognizing speech...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let recognized = self
            .recognizer
            .produce_segments(media, &self.config.options)
            .await;

        if let Some(pb) = spinner {
            match &recognized {
                Ok(segments) => pb.finish_with_message(format!("✓ {} segments", segments.len())),
                Err(_) => pb.abandon_with_message("✗ recognition failed"),
            }
        }

        let segments = recognized?;
        let recognition_time = start_time.elapsed();
        info!(
            "Recognition complete: {} segments in {:.2}s",
            segments.len(),
            recognition_time.as_secs_f64()
        );

        let mut result = self.emit(media, &segments, format)?;
        result.stats.recognition_time = recognition_time;
        result.stats.total_time = start_time.elapsed();
        Ok(result)
    }

    /// Write subtitle (and optional transcript) files for already recognized segments.
    pub fn emit(
        &self,
        media: &Path,
        segments: &[Segment],
        format: SubtitleFormat,
    ) -> Result<PipelineResult> {
        let start_time = Instant::now();

        if segments.is_empty() {
            warn!("No speech segments for {}", media.display());
        }

        let formatter = create_formatter(format, self.config.echo_cues);
        let document = formatter.format(segments)?;

        let subtitle_path =
            derive_output_path(media, self.config.output_dir.as_deref(), formatter.extension());
        write_atomic(&subtitle_path, &document)?;
        info!("Wrote {} cues to {}", segments.len(), subtitle_path.display());

        let transcript_path = if self.config.transcript {
            let text = self
                .normalizer
                .normalize_segments(segments, &self.config.transcript_separator);
            let path = derive_output_path(media, self.config.output_dir.as_deref(), "txt");
            write_atomic(&path, &text)?;
            info!("Wrote transcript to {}", path.display());
            Some(path)
        } else {
            None
        };

        let media_duration = segments.iter().map(|s| s.end).fold(0.0_f64, f64::max);
        debug!("Media duration from segments: {:.3}s", media_duration);

        Ok(PipelineResult {
            subtitle_path,
            transcript_path,
            format,
            stats: PipelineStats {
                total_time: start_time.elapsed(),
                recognition_time: Duration::ZERO,
                cues: segments.len(),
                media_duration,
                recognizer: self.recognizer.name().to_string(),
            },
        })
    }
}

/// Normalize an existing `.srt`, `.vtt`, or plain text file into a transcript.
///
/// Subtitle cues are joined with `separator`; any other file is normalized as
/// is. Without `output`, writes `<stem>.txt` next to the input (`<stem>.clean.txt`
/// when the input already is a `.txt` file).
pub fn normalize_file(
    input: &Path,
    output: Option<&Path>,
    normalizer: &TextNormalizer,
    separator: &str,
) -> Result<PathBuf> {
    if !input.exists() {
        return Err(HebscribeError::FileNotFound(input.display().to_string()));
    }

    let content = std::fs::read_to_string(input)?;
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let text = match extension.as_deref() {
        Some("srt") | Some("vtt") => {
            let segments = parse_cues(&content)?;
            debug!("Parsed {} cues from {}", segments.len(), input.display());
            normalizer.normalize_segments(&segments, separator)
        }
        _ => normalizer.normalize(&content),
    };

    let path = match output {
        Some(path) => path.to_path_buf(),
        None if extension.as_deref() == Some("txt") => derive_output_path(input, None, "clean.txt"),
        None => derive_output_path(input, None, "txt"),
    };

    write_atomic(&path, &text)?;
    info!("Wrote transcript to {}", path.display());
    Ok(path)
}

/// Print a summary of the pipeline results.
pub fn print_summary(result: &PipelineResult) {
    println!();
    println!("{}", style("═══ Transcription Complete ═══").bold());
    println!();
    println!(
        "  Subtitles:  {} ({})",
        style(result.subtitle_path.display()).cyan(),
        result.format.extension().to_uppercase()
    );
    if let Some(ref path) = result.transcript_path {
        println!("  Transcript: {}", style(path.display()).cyan());
    }
    println!("  Cues:       {}", result.stats.cues);
    println!("  Recognizer: {}", result.stats.recognizer);
    println!("  Duration:   {:.1}s media", result.stats.media_duration);
    println!();
    println!("  Timing:");
    println!(
        "    Recognize:   {:.2}s",
        result.stats.recognition_time.as_secs_f64()
    );
    println!(
        "    Total:       {:.2}s",
        result.stats.total_time.as_secs_f64()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Device, Precision};

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.options.language, "he");
        assert_eq!(config.options.beam_size, 5);
        assert_eq!(config.options.compute.device, Device::Cuda);
        assert_eq!(config.options.compute.precision, Precision::Float16);
        assert_eq!(config.transcript_separator, " ");
        assert!(!config.transcript);
        assert!(config.show_progress);
    }

    #[test]
    fn test_pipeline_config_uses_injected_compute() {
        let compute = ComputeProfile {
            device: Device::Cpu,
            precision: Precision::Int8,
        };
        let config = PipelineConfig::from_config(&Config::default(), compute);
        assert_eq!(config.options.compute, compute);
    }
}
