pub mod stages;

use crate::error::{HebscribeError, Result};
use crate::subtitle::Segment;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Upper bound on chain re-runs; every non-identity pass shortens the text,
/// so this is only reached by pathological custom verse-marker patterns.
const MAX_PASSES: usize = 64;

/// How verse-letter markers are recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerseMarkerRule {
    /// After start-of-text, `.` plus two whitespace, two spaces, or a newline.
    #[default]
    Boundary,
    /// After any whitespace character. Also strips short prose words.
    AnyWhitespace,
    /// A user-supplied pattern; every match becomes a line break.
    Custom(String),
}

impl VerseMarkerRule {
    pub fn compile(&self) -> Result<Regex> {
        match self {
            VerseMarkerRule::Boundary => Ok(stages::BOUNDARY_VERSE_MARKER.clone()),
            VerseMarkerRule::AnyWhitespace => Ok(stages::ANY_WHITESPACE_VERSE_MARKER.clone()),
            VerseMarkerRule::Custom(pattern) => {
                let regex = Regex::new(pattern).map_err(|e| {
                    HebscribeError::Normalization(format!(
                        "verse marker pattern '{pattern}' does not compile: {e}"
                    ))
                })?;
                if regex.is_match("") {
                    return Err(HebscribeError::Normalization(format!(
                        "verse marker pattern '{pattern}' matches the empty string"
                    )));
                }
                Ok(regex)
            }
        }
    }
}

/// Normalizer settings, loaded as the `[normalize]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub verse_marker: VerseMarkerRule,
    /// Literal sequences deleted after annotation stripping.
    pub strip_sequences: Vec<String>,
}

/// One step of the cleaning chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    VerseMarkers,
    Punctuation,
    CurlyAnnotations,
    ExtraSequences,
    Cantillation,
    Spaces,
    LineEndings,
    Trim,
}

/// The order stages must run in. Verse markers are matched on bare letters, so
/// they go before cantillation stripping; space collapsing precedes line-ending
/// normalization because it never touches newlines.
pub const STAGE_ORDER: [Stage; 8] = [
    Stage::VerseMarkers,
    Stage::Punctuation,
    Stage::CurlyAnnotations,
    Stage::ExtraSequences,
    Stage::Cantillation,
    Stage::Spaces,
    Stage::LineEndings,
    Stage::Trim,
];

/// Turns raw transcript text into clean continuous Hebrew prose.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    verse_marker: Regex,
    strip_sequences: Vec<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            verse_marker: stages::BOUNDARY_VERSE_MARKER.clone(),
            strip_sequences: Vec::new(),
        }
    }
}

impl TextNormalizer {
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        Ok(Self {
            verse_marker: config.verse_marker.compile()?,
            strip_sequences: config.strip_sequences.clone(),
        })
    }

    pub fn apply_stage(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::VerseMarkers => stages::remove_verse_markers_with(text, &self.verse_marker),
            Stage::Punctuation => stages::substitute_punctuation(text),
            Stage::CurlyAnnotations => stages::remove_curly_annotations(text),
            Stage::ExtraSequences => stages::strip_sequences(text, &self.strip_sequences),
            Stage::Cantillation => stages::strip_cantillation(text),
            Stage::Spaces => stages::collapse_spaces(text),
            Stage::LineEndings => stages::normalize_line_endings(text),
            Stage::Trim => text.trim().to_string(),
        }
    }

    /// Run `order` once, each stage feeding the next.
    pub fn apply_stages(&self, text: &str, order: &[Stage]) -> String {
        order
            .iter()
            .fold(text.to_string(), |acc, stage| self.apply_stage(*stage, &acc))
    }

    /// A single pass of the chain in [`STAGE_ORDER`].
    pub fn apply_once(&self, text: &str) -> String {
        self.apply_stages(text, &STAGE_ORDER)
    }

    /// Run the chain until the text stops changing.
    ///
    /// Later stages can expose new marker contexts (a removed annotation
    /// leaves two spaces behind, a stripped point leaves a bare letter), so a
    /// single pass is not idempotent on its own.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.apply_once(text);

        for pass in 1..MAX_PASSES {
            let next = self.apply_once(&current);
            if next == current {
                debug!("Normalization settled after {} passes", pass);
                return current;
            }
            current = next;
        }

        warn!("Normalization did not settle after {} passes", MAX_PASSES);
        current
    }

    /// Join trimmed segment texts with `separator` and normalize the result.
    ///
    /// Blank segments are skipped and the rest trimmed, so a segment boundary
    /// never reads as a two-space verse-marker separator.
    pub fn normalize_segments(&self, segments: &[Segment], separator: &str) -> String {
        let joined = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(separator);
        self.normalize(&joined)
    }
}

/// Normalize with the default configuration.
pub fn normalize_text(text: &str) -> String {
    TextNormalizer::default().normalize(text)
}
