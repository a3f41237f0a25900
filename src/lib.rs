pub mod camera;
pub mod config;
pub mod detector;
pub mod error;
pub mod flatness;
pub mod metrics;
pub mod patterns;
pub mod sentence;
pub mod terrain;
pub mod tokenize;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use camera::OrbitController;
pub use config::DetectorConfig;
pub use detector::{enhance, enhance_within, AiDetector, HuggingFaceDetector};
pub use error::{ConfigError, DetectorError};
pub use patterns::PatternReport;
pub use sentence::{score_sentence, SentenceSignals};
pub use terrain::{TerrainMesh, TerrainPoint};
pub use tokenize::{split_sentences, split_words};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Phrase,
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    pub name: String,
    pub weight: u32,
    pub occurrence_count: usize,
}

impl PatternMatch {
    pub fn explanation(&self) -> String {
        match self.kind {
            PatternKind::Phrase => format!("Found \"{}\" {}x", self.name, self.occurrence_count),
            PatternKind::Structural => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDetection {
    /// Probability the text is machine generated, in `[0, 1]`.
    pub probability: f64,
    pub source: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    /// 0..=100, higher is flatter / more AI-like.
    pub flatness: u32,
    pub diversity: f64,
    pub variance_std_dev: f64,
    pub burstiness_ratio: f64,
    pub ai_pattern_score: u32,
    pub pattern_explanations: Vec<String>,
    pub pattern_matches: Vec<PatternMatch>,
    pub sentences: Vec<String>,
    pub sentence_scores: Vec<f64>,
    pub sentence_count: usize,
    pub word_count: usize,
    pub external_detection: Option<ExternalDetection>,
    pub blended_flatness: Option<u32>,
}

impl AnalysisResult {
    /// Only the first detection sticks; returns `false` if one was already set.
    pub fn apply_detection(&mut self, detection: ExternalDetection) -> bool {
        if self.external_detection.is_some() {
            return false;
        }
        self.blended_flatness = Some(flatness::blend(self.flatness, detection.probability));
        self.external_detection = Some(detection);
        true
    }

    pub fn effective_flatness(&self) -> u32 {
        self.blended_flatness.unwrap_or(self.flatness)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze(text: &str) -> AnalysisResult {
    let sentences = split_sentences(text);
    let words = split_words(text);

    let diversity = metrics::lexical_diversity(&words);
    let variance_std_dev = metrics::sentence_length_std_dev(&sentences);
    let burstiness_ratio = metrics::burstiness(&sentences);

    let report = patterns::detect_patterns(text, &sentences);
    let flatness = flatness::flatness(diversity, variance_std_dev, burstiness_ratio, report.score);

    let sentence_scores: Vec<f64> = sentences.iter().map(|s| score_sentence(s)).collect();

    debug!(
        sentences = sentences.len(),
        words = words.len(),
        pattern_score = report.score,
        flatness,
        "analysis complete"
    );

    AnalysisResult {
        text: text.to_string(),
        flatness,
        diversity,
        variance_std_dev,
        burstiness_ratio,
        ai_pattern_score: report.score,
        pattern_explanations: report.explanations,
        pattern_matches: report.matches,
        sentence_count: sentences.len(),
        sentence_scores,
        sentences,
        word_count: words.len(),
        external_detection: None,
        blended_flatness: None,
    }
}
