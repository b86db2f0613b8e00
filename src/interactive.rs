use console::style;
use dialoguer::{Confirm, Input, Select};
use hebscribe::config::{Config, SubtitleFormat};
use indicatif::HumanBytes;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lesson recordings: video uploads and audio-only exports.
const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "mov", "webm", "mp3", "m4a", "wav", "ogg", "opus", "flac",
];

pub struct InteractiveResult {
    pub input: PathBuf,
    pub format: SubtitleFormat,
    pub transcript: bool,
    /// Pre-recognized segments, used when no recognizer command is configured.
    pub segments: Option<PathBuf>,
}

pub fn run_interactive_wizard(config: &Config) -> anyhow::Result<InteractiveResult> {
    print_header();

    // Step 1: Select source file
    let input = select_source_file(config)?;

    // Step 2: Segment source
    let segments = select_segment_source(config, &input)?;

    // Step 3: Select output format
    let format = select_output_format(config.default_format)?;

    // Step 4: Transcript
    let transcript = Confirm::new()
        .with_prompt("Also write a clean Hebrew transcript (.txt)?")
        .default(true)
        .interact()?;

    // Step 5: Confirm
    print_summary(&input, format, transcript, segments.as_deref());

    if !Confirm::new()
        .with_prompt("Proceed with these settings?")
        .default(true)
        .interact()?
    {
        anyhow::bail!("Cancelled by user");
    }

    println!();

    Ok(InteractiveResult {
        input,
        format,
        transcript,
        segments,
    })
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║        hebscribe - Lesson Subtitle Generator      ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

fn select_source_file(config: &Config) -> anyhow::Result<PathBuf> {
    println!("\n{}", style("Select source file:").bold());

    let files = scan_media_files(Path::new("."))?;

    if files.is_empty() {
        println!("  No media files found in current directory.\n");
        return prompt_existing_path("Enter file path");
    }

    let mut items: Vec<String> = files.iter().map(MediaFile::label).collect();
    items.push("Enter custom path...".to_string());

    // Without a recognizer, preselect a lesson that has segments.
    let default = if config.recognizer_command.is_none() {
        files.iter().position(|f| f.has_segments).unwrap_or(0)
    } else {
        0
    };

    let selection = Select::new()
        .with_prompt("Choose a lesson")
        .items(&items)
        .default(default)
        .interact()?;

    match files.get(selection) {
        Some(file) => Ok(file.path.clone()),
        None => prompt_existing_path("Enter file path"),
    }
}

fn prompt_existing_path(prompt: &str) -> anyhow::Result<PathBuf> {
    let path: String = Input::new().with_prompt(prompt).interact_text()?;
    let path = PathBuf::from(path.trim());
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(path)
}

fn select_segment_source(config: &Config, input: &Path) -> anyhow::Result<Option<PathBuf>> {
    if let Some(ref command) = config.recognizer_command {
        println!("{} Recognizer: {}", style("✓").green(), command);
        return Ok(None);
    }

    println!(
        "{} No recognizer command configured (set HEBSCRIBE_RECOGNIZER)",
        style("!").yellow()
    );

    let sidecar = segments_sidecar(input);
    if sidecar.exists()
        && Confirm::new()
            .with_prompt(format!("Use segments from {}?", sidecar.display()))
            .default(true)
            .interact()?
    {
        return Ok(Some(sidecar));
    }

    prompt_existing_path("Enter segments JSON path").map(Some)
}

/// `lesson.mp4` -> `lesson.segments.json`
fn segments_sidecar(input: &Path) -> PathBuf {
    input.with_extension("segments.json")
}

/// A lesson recording in the working directory.
struct MediaFile {
    path: PathBuf,
    size: u64,
    has_segments: bool,
}

impl MediaFile {
    fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        if self.has_segments {
            format!("{} ({}, segments ready)", name, HumanBytes(self.size))
        } else {
            format!("{} ({})", name, HumanBytes(self.size))
        }
    }
}

fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MEDIA_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn scan_media_files(dir: &Path) -> io::Result<Vec<MediaFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_media_file(&path) {
            continue;
        }

        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        let has_segments = segments_sidecar(&path).is_file();
        files.push(MediaFile {
            path,
            size,
            has_segments,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn select_output_format(default: SubtitleFormat) -> anyhow::Result<SubtitleFormat> {
    let formats = [
        ("SRT", "Most compatible (VLC, YouTube, etc.)", SubtitleFormat::Srt),
        ("VTT", "Web/HTML5 video", SubtitleFormat::Vtt),
    ];

    let items: Vec<String> = formats
        .iter()
        .map(|(name, desc, _)| format!("{} - {}", name, desc))
        .collect();

    let default_idx = formats
        .iter()
        .position(|(_, _, f)| *f == default)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Select output format")
        .items(&items)
        .default(default_idx)
        .interact()?;

    Ok(formats[selection].2)
}

fn print_summary(input: &Path, format: SubtitleFormat, transcript: bool, segments: Option<&Path>) {
    println!("\n{}", style("═══ Summary ═══").bold());
    println!("  Input:      {}", style(input.display()).cyan());
    if let Some(segments) = segments {
        println!("  Segments:   {}", style(segments.display()).cyan());
    }
    println!("  Format:     {}", format.extension().to_uppercase());
    println!("  Transcript: {}", if transcript { "yes" } else { "no" });
    println!();
}
