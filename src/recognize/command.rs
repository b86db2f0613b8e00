use super::{parse_segments_json, RecognitionOptions, Recognizer};
use crate::error::{HebscribeError, Result};
use crate::subtitle::Segment;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs an external speech recognition program and reads segment JSON from
/// its stdout.
///
/// The program is invoked as
/// `<program> [args..] <media> --language L --initial-prompt P --beam-size N
/// --model M --device D --compute-type C`.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a whitespace-separated command line, e.g. `python3 recognize.py`.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| {
            HebscribeError::Config("recognizer command is empty".to_string())
        })?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn build_args(&self, media: &Path, options: &RecognitionOptions) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(media.display().to_string());
        args.extend([
            "--language".to_string(),
            options.language.clone(),
            "--initial-prompt".to_string(),
            options.initial_prompt.clone(),
            "--beam-size".to_string(),
            options.beam_size.to_string(),
            "--model".to_string(),
            options.model.clone(),
            "--device".to_string(),
            options.compute.device.to_string(),
            "--compute-type".to_string(),
            options.compute.precision.to_string(),
        ]);
        args
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    async fn produce_segments(
        &self,
        media: &Path,
        options: &RecognitionOptions,
    ) -> Result<Vec<Segment>> {
        if !media.exists() {
            return Err(HebscribeError::FileNotFound(media.display().to_string()));
        }

        let args = self.build_args(media, options);
        info!(
            "Running {} (model {}, {} / {})",
            self.program, options.model, options.compute.device, options.compute.precision
        );
        debug!("Recognizer args: {:?}", args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                HebscribeError::Recognition(format!("Failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HebscribeError::Recognition(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_segments_json(&stdout).map_err(|e| {
            HebscribeError::Recognition(format!(
                "{} printed unreadable segments: {e}",
                self.program
            ))
        })
    }

    fn name(&self) -> &'static str {
        "external command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComputeProfile, Config, Device, Precision};
    use std::path::PathBuf;

    fn options() -> RecognitionOptions {
        RecognitionOptions::from_config(
            &Config::default(),
            ComputeProfile {
                device: Device::Cpu,
                precision: Precision::Int8,
            },
        )
    }

    #[test]
    fn test_from_command_line() {
        let recognizer = CommandRecognizer::from_command_line("python3 recognize.py -q").unwrap();
        assert_eq!(recognizer.program(), "python3");
        assert_eq!(recognizer.args, vec!["recognize.py", "-q"]);

        assert!(CommandRecognizer::from_command_line("   ").is_err());
    }

    #[test]
    fn test_build_args() {
        let recognizer = CommandRecognizer::from_command_line("recognize --json").unwrap();
        let args = recognizer.build_args(&PathBuf::from("lesson.mp4"), &options());

        assert_eq!(&args[..2], &["--json", "lesson.mp4"]);
        let joined = args.join(" ");
        assert!(joined.contains("--language he"));
        assert!(joined.contains("--beam-size 5"));
        assert!(joined.contains("--model large-v2"));
        assert!(joined.contains("--device cpu"));
        assert!(joined.contains("--compute-type int8"));
    }

    #[tokio::test]
    async fn test_missing_media() {
        let recognizer = CommandRecognizer::new("true");
        let result = recognizer
            .produce_segments(Path::new("/nonexistent/lesson.mp4"), &options())
            .await;
        assert!(matches!(result, Err(HebscribeError::FileNotFound(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_segments_from_stdout() {
        let media = tempfile::NamedTempFile::new().unwrap();
        // The trailing media path and options land in the script's $0.. and are ignored.
        let recognizer = CommandRecognizer {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                r#"echo '[{"start":0.0,"end":1.0,"text":"x"}]'"#.to_string(),
            ],
        };

        let segments = recognizer
            .produce_segments(media.path(), &options())
            .await
            .unwrap();

        assert_eq!(segments, vec![Segment::new(0.0, 1.0, "x")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_recognition_error() {
        let media = tempfile::NamedTempFile::new().unwrap();
        let recognizer = CommandRecognizer::new("false");

        let err = recognizer
            .produce_segments(media.path(), &options())
            .await
            .unwrap_err();

        assert!(matches!(err, HebscribeError::Recognition(_)));
    }
}
