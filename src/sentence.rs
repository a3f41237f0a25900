use once_cell::sync::Lazy;
use regex::Regex;

use crate::metrics::lexical_diversity;
use crate::tokenize::{ascii_word_regex, split_words};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

// Tiered arrays are ordered from the highest threshold down; only the first
// tier that trips contributes.
struct Weights {
    human_marker: f64,
    strict_phrase: f64,
    length: [f64; 3],
    hedging: [f64; 2],
    commas: [f64; 3],
    abstract_nouns: [f64; 2],
    recursive: f64,
    gerunds: [f64; 2],
    penalty_scale: f64,
}

static SCORE_WEIGHTS: Weights = Weights {
    human_marker: 0.15,
    strict_phrase: 0.25,
    length: [0.4, 0.25, 0.15],
    hedging: [0.3, 0.2],
    commas: [0.3, 0.2, 0.1],
    abstract_nouns: [0.25, 0.15],
    recursive: 0.2,
    gerunds: [0.2, 0.1],
    penalty_scale: 0.8,
};

static HEIGHT_WEIGHTS: Weights = Weights {
    human_marker: 3.0,
    strict_phrase: 8.0,
    length: [30.0, 20.0, 12.0],
    hedging: [25.0, 15.0],
    commas: [25.0, 15.0, 8.0],
    abstract_nouns: [20.0, 12.0],
    recursive: 15.0,
    gerunds: [15.0, 8.0],
    penalty_scale: 0.8,
};

// Thresholds are strict "greater than", highest first.
const LENGTH_THRESHOLDS: [usize; 3] = [100, 60, 40];
const HEDGING_THRESHOLDS: [usize; 2] = [5, 3];
const COMMA_THRESHOLDS: [usize; 3] = [12, 8, 5];
const ABSTRACT_THRESHOLDS: [usize; 2] = [4, 2];
const RECURSIVE_THRESHOLD: usize = 2;
const GERUND_THRESHOLDS: [f64; 2] = [0.15, 0.1];

const NEUTRAL_SCORE: f64 = 0.5;
const MEAN_WORD_LENGTH_CAP: f64 = 8.0;

pub const MIN_TERRAIN_HEIGHT: f64 = 1.0;
pub const MAX_TERRAIN_HEIGHT: f64 = 14.0;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static STRICT_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bit'?s important to note\b",
        r"\bit'?s worth mentioning\b",
        r"\bin today'?s (rapidly evolving|digital|modern)\b",
        r"\bleverage\b.*\b(synerg|opportunit)",
        r"\bstakeholder(s)?\b.*\b(engag|align|priorit)",
        r"\bcomprehensive (understanding|approach|strategy|framework)\b",
        r"\boptimize\b.*\b(workflow|process|performance|operational)\b",
        r"\b(moreover|furthermore|additionally),\b.*\b(facilitate|enable|enhance)\b",
        r"\bdata-driven decision(s|-making)?\b",
        r"\bevidence-based approach(es)?\b",
        r"\bcompetitive advantage\b",
        r"\bdigital transformation (initiative|effort|journey)\b",
        r"\bcross-functional (team|collaboration)\b",
        r"\bkey performance indicator(s)?\b",
        r"\bemerging trend(s)?\b.*\b(capitalize|identify)\b",
        r"\borganizational culture\b.*\b(change management|transformation)\b",
        r"\bcontinuous learning\b.*\b(innovation|environment)\b",
        r"\bsubsequently,\b.*\b(foster|enable|facilitate)\b",
        r"\bparamount\b.*\b(organizational success|achievement)\b",
        r"\bsynerg(y|ies)\b",
        r"\bparadigm shift\b",
        r"\bdelve into\b",
    ]
    .iter()
    .map(|p| ascii_word_regex(&format!("(?i){p}")))
    .collect()
});

static HUMAN_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        ascii_word_regex(
            r"(?i)\b(?:I|my|me|you|really|just|actually|literally|honestly|basically|yeah|kinda|sorta)\b",
        ),
        Regex::new(r"[!?]").unwrap(),
        Regex::new(r"n't|'ll|'re|'ve|'d|'m").unwrap(),
    ]
});

static HEDGING_RE: Lazy<Regex> = Lazy::new(|| {
    ascii_word_regex(concat!(
        r"(?i)\b(increasingly|arguably|essentially|fundamentally|notably|particularly",
        r"|specifically|generally|typically|largely|primarily|ultimately|ostensibly|curiously",
        r"|strategically|cautiously|broadly|perpetually|endlessly|continuously|remarkably)\b",
    ))
});

static ABSTRACT_NOUN_RE: Lazy<Regex> = Lazy::new(|| {
    ascii_word_regex(concat!(
        r"(?i)\b(optimization|synthesis|abstraction|coherence|equilibrium|causality|variance",
        r"|specificity|familiarity|consistency|capability|efficiency|probability|prediction",
        r"|recognition|computation)\b",
    ))
});

static RECURSIVE_RE: Lazy<Regex> =
    Lazy::new(|| ascii_word_regex(r"(?i)\b(itself|themselves|self-referential|meta-)\b"));

static GERUND_RE: Lazy<Regex> = Lazy::new(|| ascii_word_regex(r"\b\w+ing\b"));

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSignals {
    pub word_count: usize,
    pub local_diversity: f64,
    pub mean_word_length: f64,
    /// Distinct strict AI phrases present (each counted at most once).
    pub strict_phrases: usize,
    /// Human marker classes present, 0..=3.
    pub human_markers: usize,
    pub hedging_words: usize,
    pub commas: usize,
    pub abstract_nouns: usize,
    pub recursive_markers: usize,
    pub gerunds: usize,
}

impl SentenceSignals {
    pub fn measure(sentence: &str) -> Self {
        let words = split_words(sentence);
        let word_count = words.len();
        let mean_word_length = if word_count == 0 {
            0.0
        } else {
            words.iter().map(String::len).sum::<usize>() as f64 / word_count as f64
        };

        Self {
            word_count,
            local_diversity: lexical_diversity(&words),
            mean_word_length,
            strict_phrases: STRICT_PHRASES.iter().filter(|re| re.is_match(sentence)).count(),
            human_markers: HUMAN_MARKERS.iter().filter(|re| re.is_match(sentence)).count(),
            hedging_words: HEDGING_RE.find_iter(sentence).count(),
            commas: sentence.matches(',').count(),
            abstract_nouns: ABSTRACT_NOUN_RE.find_iter(sentence).count(),
            recursive_markers: RECURSIVE_RE.find_iter(sentence).count(),
            gerunds: GERUND_RE.find_iter(sentence).count(),
        }
    }

    fn gerund_ratio(&self) -> f64 {
        self.gerunds as f64 / self.word_count.max(1) as f64
    }

    fn penalty(&self, w: &Weights) -> f64 {
        let mut penalty = self.strict_phrases as f64 * w.strict_phrase;
        penalty += tier(self.word_count, &LENGTH_THRESHOLDS, &w.length);
        penalty += tier(self.hedging_words, &HEDGING_THRESHOLDS, &w.hedging);
        penalty += tier(self.commas, &COMMA_THRESHOLDS, &w.commas);
        penalty += tier(self.abstract_nouns, &ABSTRACT_THRESHOLDS, &w.abstract_nouns);
        if self.recursive_markers > RECURSIVE_THRESHOLD {
            penalty += w.recursive;
        }
        let ratio = self.gerund_ratio();
        if let Some(i) = GERUND_THRESHOLDS.iter().position(|&t| ratio > t) {
            penalty += w.gerunds[i];
        }
        penalty
    }

    fn bonus(&self, w: &Weights) -> f64 {
        self.human_markers as f64 * w.human_marker
    }

    pub fn score(&self) -> f64 {
        if self.word_count == 0 {
            return NEUTRAL_SCORE;
        }
        let base = 0.7 * self.local_diversity
            + 0.3 * (self.mean_word_length.min(MEAN_WORD_LENGTH_CAP) / 10.0);
        let score = base + self.bonus(&SCORE_WEIGHTS)
            - SCORE_WEIGHTS.penalty_scale * self.penalty(&SCORE_WEIGHTS);
        score.clamp(0.0, 1.0)
    }

    pub fn height(&self) -> f64 {
        let base = self.local_diversity * 14.0 + (self.mean_word_length - 4.0) * 1.2;
        let height = base + self.bonus(&HEIGHT_WEIGHTS)
            - HEIGHT_WEIGHTS.penalty_scale * self.penalty(&HEIGHT_WEIGHTS);
        height.clamp(MIN_TERRAIN_HEIGHT, MAX_TERRAIN_HEIGHT)
    }
}

fn tier<const N: usize>(value: usize, thresholds: &[usize; N], weights: &[f64; N]) -> f64 {
    thresholds
        .iter()
        .position(|&t| value > t)
        .map_or(0.0, |i| weights[i])
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score one sentence on its own; a sentence with no words scores 0.5.
pub fn score_sentence(sentence: &str) -> f64 {
    SentenceSignals::measure(sentence).score()
}

pub fn terrain_height(sentence: &str) -> f64 {
    SentenceSignals::measure(sentence).height()
}
