mod interactive;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hebscribe::config::{ComputeProfile, Config, Device, Precision, RuntimeEnvironment};
use hebscribe::recognize::{CommandRecognizer, Recognizer, SegmentFileRecognizer};
use hebscribe::{normalize_file, print_summary, PipelineConfig, TextNormalizer, TranscriptionPipeline};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hebscribe")]
#[command(version, about = "Subtitles and clean Hebrew transcripts from speech recognition")]
#[command(
    long_about = "Turn speech recognition segments into SRT/VTT subtitles and normalized Hebrew transcripts."
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize a media file and write subtitles
    Transcribe {
        /// Input video/audio file
        input: PathBuf,

        /// Subtitle format: srt, vtt (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also write a normalized .txt transcript
        #[arg(short, long)]
        transcript: bool,

        /// Read recognized segments from a JSON file instead of running a recognizer
        #[arg(long)]
        segments: Option<PathBuf>,

        /// Recognizer command line (overrides the configured one)
        #[arg(long)]
        recognizer: Option<String>,

        /// Compute device: cpu, cuda
        #[arg(long)]
        device: Option<String>,

        /// Compute precision: default, float16, float32, int8
        #[arg(long)]
        precision: Option<String>,

        /// Do not echo cues while writing
        #[arg(long)]
        no_echo: bool,
    },

    /// Normalize an .srt, .vtt, or text file into a clean transcript
    Clean {
        /// Input subtitle or text file
        input: PathBuf,

        /// Output file (defaults to <input stem>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pick a media file and options interactively
    Wizard,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Decide device and precision once: detected environment, then config, then CLI.
fn resolve_compute(
    config: &Config,
    device: Option<&str>,
    precision: Option<&str>,
) -> Result<ComputeProfile> {
    let environment = RuntimeEnvironment::detect();
    let mut profile = config.compute_profile(ComputeProfile::for_environment(environment));

    if let Some(device) = device {
        profile.device = device
            .parse::<Device>()
            .map_err(|e: String| anyhow::anyhow!(e))?;
    }
    if let Some(precision) = precision {
        profile.precision = precision
            .parse::<Precision>()
            .map_err(|e: String| anyhow::anyhow!(e))?;
    }

    info!(
        "Compute: {} / {} (environment: {:?})",
        profile.device, profile.precision, environment
    );
    Ok(profile)
}

fn build_recognizer(
    config: &Config,
    segments: Option<&Path>,
    command: Option<&str>,
) -> Result<Box<dyn Recognizer>> {
    if let Some(path) = segments {
        return Ok(Box::new(SegmentFileRecognizer::new(path)));
    }

    let command_line = command
        .or(config.recognizer_command.as_deref())
        .context("No recognizer configured. Pass --segments, --recognizer, or set HEBSCRIBE_RECOGNIZER")?;

    Ok(Box::new(CommandRecognizer::from_command_line(command_line)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    match cli.command {
        Commands::Transcribe {
            input,
            format,
            output_dir,
            transcript,
            segments,
            recognizer,
            device,
            precision,
            no_echo,
        } => {
            let compute = resolve_compute(&config, device.as_deref(), precision.as_deref())?;
            let recognizer = build_recognizer(&config, segments.as_deref(), recognizer.as_deref())?;

            let mut pipeline_config = PipelineConfig::from_config(&config, compute);
            pipeline_config.output_dir = output_dir;
            pipeline_config.transcript = transcript;
            pipeline_config.echo_cues = !no_echo;

            let format = format.unwrap_or_else(|| config.default_format.to_string());

            info!("Input:    {}", input.display());
            info!("Format:   {}", format);
            info!("Language: {}", config.language);

            let pipeline = TranscriptionPipeline::new(recognizer, pipeline_config)?;
            let result = pipeline
                .run(&input, &format)
                .await
                .with_context(|| format!("Transcription of {} failed", input.display()))?;

            print_summary(&result);
        }
        Commands::Clean { input, output } => {
            let normalizer = TextNormalizer::new(&config.normalize)?;
            let path = normalize_file(
                &input,
                output.as_deref(),
                &normalizer,
                &config.transcript_separator,
            )
            .with_context(|| format!("Cleaning {} failed", input.display()))?;

            info!("Transcript saved to {}", path.display());
        }
        Commands::Wizard => {
            let choice = interactive::run_interactive_wizard(&config)?;
            let compute = resolve_compute(&config, None, None)?;
            let recognizer = build_recognizer(&config, choice.segments.as_deref(), None)?;

            let mut pipeline_config = PipelineConfig::from_config(&config, compute);
            pipeline_config.transcript = choice.transcript;

            let pipeline = TranscriptionPipeline::new(recognizer, pipeline_config)?;
            let result = pipeline
                .run_format(&choice.input, choice.format)
                .await
                .with_context(|| format!("Transcription of {} failed", choice.input.display()))?;

            print_summary(&result);
        }
    }

    Ok(())
}
