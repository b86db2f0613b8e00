use crate::error::{HebscribeError, Result};
use crate::normalize::NormalizerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_LANGUAGE: &str = "he";
pub const DEFAULT_INITIAL_PROMPT: &str = "Hello, How is it going? Please, always use punctuation.";
pub const DEFAULT_BEAM_SIZE: u32 = 5;
pub const DEFAULT_MODEL: &str = "large-v2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    #[default]
    Srt,
    Vtt,
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleFormat::Srt => write!(f, "srt"),
            SubtitleFormat::Vtt => write!(f, "vtt"),
        }
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = HebscribeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "srt" => Ok(SubtitleFormat::Srt),
            "vtt" => Ok(SubtitleFormat::Vtt),
            _ => Err(HebscribeError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl SubtitleFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda,
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda => write!(f, "cuda"),
        }
    }
}

impl std::str::FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" | "gpu" => Ok(Device::Cuda),
            _ => Err(format!("Unknown device: {}. Use 'cpu' or 'cuda'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Default,
    Float16,
    Float32,
    Int8,
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Default => write!(f, "default"),
            Precision::Float16 => write!(f, "float16"),
            Precision::Float32 => write!(f, "float32"),
            Precision::Int8 => write!(f, "int8"),
        }
    }
}

impl std::str::FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Precision::Default),
            "float16" | "fp16" => Ok(Precision::Float16),
            "float32" | "fp32" => Ok(Precision::Float32),
            "int8" => Ok(Precision::Int8),
            _ => Err(format!(
                "Unknown precision: {}. Use 'default', 'float16', 'float32', or 'int8'",
                s
            )),
        }
    }
}

/// Hosted notebook or editor the process was launched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    Kaggle,
    JupyterServer,
    Colab,
    VSCode,
}

impl RuntimeEnvironment {
    /// Detect from the current process environment. Call once at startup.
    pub fn detect() -> Option<Self> {
        Self::detect_from(std::env::vars().map(|(name, _)| name))
    }

    /// Detect from a list of environment variable names; first matching prefix wins.
    pub fn detect_from<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        let has_prefix = |prefix: &str| names.iter().any(|n| n.as_ref().starts_with(prefix));

        if has_prefix("KAGGLE_") {
            Some(RuntimeEnvironment::Kaggle)
        } else if has_prefix("JPY_") {
            Some(RuntimeEnvironment::JupyterServer)
        } else if has_prefix("COLAB_") {
            Some(RuntimeEnvironment::Colab)
        } else if has_prefix("VSCODE_") {
            Some(RuntimeEnvironment::VSCode)
        } else {
            None
        }
    }
}

/// Device and numeric precision handed to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeProfile {
    pub device: Device,
    pub precision: Precision,
}

impl Default for ComputeProfile {
    fn default() -> Self {
        Self {
            device: Device::Cuda,
            precision: Precision::Float16,
        }
    }
}

impl ComputeProfile {
    /// Local editor sessions have no GPU; hosted notebooks do.
    pub fn for_environment(env: Option<RuntimeEnvironment>) -> Self {
        match env {
            Some(RuntimeEnvironment::VSCode) => Self {
                device: Device::Cpu,
                precision: Precision::Int8,
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub initial_prompt: String,
    pub beam_size: u32,
    pub model: String,
    pub default_format: SubtitleFormat,
    pub device: Option<Device>,
    pub precision: Option<Precision>,
    /// External program that prints segment JSON for a media file.
    pub recognizer_command: Option<String>,
    /// Joins segment texts before transcript normalization.
    pub transcript_separator: String,
    pub normalize: NormalizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            initial_prompt: DEFAULT_INITIAL_PROMPT.to_string(),
            beam_size: DEFAULT_BEAM_SIZE,
            model: DEFAULT_MODEL.to_string(),
            default_format: SubtitleFormat::default(),
            device: None,
            precision: None,
            recognizer_command: None,
            transcript_separator: " ".to_string(),
            normalize: NormalizerConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => config = file_config,
                    Err(e) => warn!("Ignoring malformed {}: {}", config_path.display(), e),
                }
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Override fields from `HEBSCRIBE_*` variables; unparsable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup("HEBSCRIBE_LANGUAGE") {
            self.language = language;
        }
        if let Some(prompt) = lookup("HEBSCRIBE_PROMPT") {
            self.initial_prompt = prompt;
        }
        if let Some(beam) = lookup("HEBSCRIBE_BEAM_SIZE") {
            if let Ok(b) = beam.parse() {
                self.beam_size = b;
            }
        }
        if let Some(model) = lookup("HEBSCRIBE_MODEL") {
            self.model = model;
        }
        if let Some(format) = lookup("HEBSCRIBE_DEFAULT_FORMAT") {
            if let Ok(f) = format.parse() {
                self.default_format = f;
            }
        }
        if let Some(device) = lookup("HEBSCRIBE_DEVICE") {
            if let Ok(d) = device.parse() {
                self.device = Some(d);
            }
        }
        if let Some(precision) = lookup("HEBSCRIBE_PRECISION") {
            if let Ok(p) = precision.parse() {
                self.precision = Some(p);
            }
        }
        if let Some(command) = lookup("HEBSCRIBE_RECOGNIZER") {
            self.recognizer_command = Some(command);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(HebscribeError::Config(
                "language must not be empty".to_string(),
            ));
        }

        if self.beam_size == 0 {
            return Err(HebscribeError::Config(
                "beam_size must be greater than 0".to_string(),
            ));
        }

        self.normalize.verse_marker.compile()?;

        Ok(())
    }

    /// Explicit device/precision settings win over the detected profile.
    pub fn compute_profile(&self, detected: ComputeProfile) -> ComputeProfile {
        ComputeProfile {
            device: self.device.unwrap_or(detected.device),
            precision: self.precision.unwrap_or(detected.precision),
        }
    }

    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hebscribe").join("config.toml"))
    }
}
