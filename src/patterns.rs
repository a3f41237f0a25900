use once_cell::sync::Lazy;
use regex::Regex;

use crate::metrics::{population_std_dev, sentence_lengths};
use crate::tokenize::{ascii_word_regex, whitespace_token_count};
use crate::{PatternKind, PatternMatch};

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    uniform_strong_std_dev: f64,
    uniform_strong_penalty: u32,
    uniform_mild_std_dev: f64,
    uniform_mild_penalty: u32,
    ratio_min_tokens: usize,
    contraction_scarce_ratio: f64,
    contraction_scarce_penalty: u32,
    contraction_few_ratio: f64,
    contraction_few_penalty: u32,
    passive_per_sentence: f64,
    passive_penalty: u32,
    formal_transition_max: usize,
    formal_transition_penalty: u32,
    length_very_long_mean: f64,
    length_very_long_penalty: u32,
    length_long_mean: f64,
    length_long_penalty: u32,
    personal_voice_ratio: f64,
    personal_voice_penalty: u32,
    score_max: u32,
}

static HP: Hyperparameters = Hyperparameters {
    uniform_strong_std_dev: 6.0,
    uniform_strong_penalty: 25,
    uniform_mild_std_dev: 8.0,
    uniform_mild_penalty: 15,
    ratio_min_tokens: 50,
    contraction_scarce_ratio: 0.01,
    contraction_scarce_penalty: 20,
    contraction_few_ratio: 0.03,
    contraction_few_penalty: 10,
    passive_per_sentence: 0.3,
    passive_penalty: 15,
    formal_transition_max: 3,
    formal_transition_penalty: 12,
    length_very_long_mean: 25.0,
    length_very_long_penalty: 15,
    length_long_mean: 20.0,
    length_long_penalty: 8,
    personal_voice_ratio: 0.02,
    personal_voice_penalty: 18,
    score_max: 100,
};

// ---------------------------------------------------------------------------
// Phrase table
// ---------------------------------------------------------------------------

struct PhraseRule {
    name: &'static str,
    pattern: &'static str,
    weight: u32,
}

const PHRASE_TABLE: &[PhraseRule] = &[
    PhraseRule { name: "delve", pattern: r"\bdelve\b", weight: 15 },
    PhraseRule { name: "important to note", pattern: r"it'?s important to note", weight: 12 },
    PhraseRule { name: "worth mentioning", pattern: r"it'?s worth mentioning", weight: 12 },
    PhraseRule { name: "in today's", pattern: r"in today'?s", weight: 8 },
    PhraseRule { name: "leverage", pattern: r"\bleverage\b", weight: 10 },
    PhraseRule { name: "utilize", pattern: r"\butilize\b", weight: 10 },
    PhraseRule { name: "facilitate", pattern: r"\bfacilitate\b", weight: 10 },
    PhraseRule { name: "moreover", pattern: r"\bmoreover\b", weight: 7 },
    PhraseRule { name: "furthermore", pattern: r"\bfurthermore\b", weight: 7 },
    PhraseRule { name: "additionally", pattern: r"\badditionally\b", weight: 7 },
    PhraseRule { name: "subsequently", pattern: r"\bsubsequently\b", weight: 8 },
    PhraseRule { name: "comprehensive", pattern: r"\bcomprehensive\b", weight: 6 },
    PhraseRule { name: "optimize", pattern: r"\boptimize\b", weight: 8 },
    PhraseRule { name: "stakeholder", pattern: r"\bstakeholder", weight: 9 },
    PhraseRule { name: "synergy", pattern: r"\bsynergy\b", weight: 10 },
    PhraseRule { name: "paradigm", pattern: r"\bparadigm\b", weight: 9 },
    PhraseRule { name: "in conclusion", pattern: r"in conclusion", weight: 8 },
    PhraseRule { name: "to summarize", pattern: r"to summarize", weight: 8 },
];

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static PHRASE_RES: Lazy<Vec<(Regex, &'static PhraseRule)>> = Lazy::new(|| {
    PHRASE_TABLE
        .iter()
        .map(|rule| (ascii_word_regex(&format!("(?i){}", rule.pattern)), rule))
        .collect()
});

static CONTRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"n't|'ll|'re|'ve|'d|'m|'s").unwrap());

static PASSIVE_RE: Lazy<Regex> =
    Lazy::new(|| ascii_word_regex(r"(?i)\b(?:is|are|was|were|be|been|being)\s+\w+ed\b"));

static FORMAL_TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    ascii_word_regex(r"(?i)\b(?:however|therefore|thus|hence|consequently|accordingly)\b")
});

static PERSONALITY_RE: Lazy<Regex> = Lazy::new(|| {
    ascii_word_regex(r"(?i)\b(?:I|my|me|you|really|just|actually|literally|honestly|basically)\b")
});

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PatternReport {
    pub score: u32,
    pub explanations: Vec<String>,
    pub matches: Vec<PatternMatch>,
}

fn structural(name: &str, weight: u32) -> PatternMatch {
    PatternMatch {
        kind: PatternKind::Structural,
        name: name.to_string(),
        weight,
        occurrence_count: 1,
    }
}

// ---------------------------------------------------------------------------
// Rule implementations
// ---------------------------------------------------------------------------

fn rule_phrases(text: &str) -> Vec<PatternMatch> {
    PHRASE_RES
        .iter()
        .filter_map(|(re, rule)| {
            let count = re.find_iter(text).count();
            (count > 0).then(|| PatternMatch {
                kind: PatternKind::Phrase,
                name: rule.name.to_string(),
                weight: rule.weight,
                occurrence_count: count,
            })
        })
        .collect()
}

fn rule_uniformity(lengths: &[f64]) -> Option<PatternMatch> {
    if lengths.is_empty() {
        return None;
    }
    let std_dev = population_std_dev(lengths);
    if std_dev < HP.uniform_strong_std_dev {
        Some(structural("Very uniform sentence length", HP.uniform_strong_penalty))
    } else if std_dev < HP.uniform_mild_std_dev {
        Some(structural("Somewhat uniform sentences", HP.uniform_mild_penalty))
    } else {
        None
    }
}

fn rule_contractions(text: &str, token_count: usize) -> Option<PatternMatch> {
    if token_count <= HP.ratio_min_tokens {
        return None;
    }
    let ratio = CONTRACTION_RE.find_iter(text).count() as f64 / token_count as f64;
    if ratio < HP.contraction_scarce_ratio {
        Some(structural("Almost no contractions", HP.contraction_scarce_penalty))
    } else if ratio < HP.contraction_few_ratio {
        Some(structural("Few contractions", HP.contraction_few_penalty))
    } else {
        None
    }
}

fn rule_passive_voice(text: &str, sentence_count: usize) -> Option<PatternMatch> {
    let passive = PASSIVE_RE.find_iter(text).count();
    (passive > 0 && passive as f64 > sentence_count as f64 * HP.passive_per_sentence)
        .then(|| structural("High passive voice usage", HP.passive_penalty))
}

fn rule_formal_transitions(text: &str) -> Option<PatternMatch> {
    let transitions = FORMAL_TRANSITION_RE.find_iter(text).count();
    (transitions > HP.formal_transition_max)
        .then(|| structural("Formal transition words", HP.formal_transition_penalty))
}

fn rule_sentence_length(lengths: &[f64]) -> Option<PatternMatch> {
    if lengths.is_empty() {
        return None;
    }
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean > HP.length_very_long_mean {
        Some(structural("Very long sentences", HP.length_very_long_penalty))
    } else if mean > HP.length_long_mean {
        Some(structural("Long sentences", HP.length_long_penalty))
    } else {
        None
    }
}

fn rule_personal_voice(text: &str, token_count: usize) -> Option<PatternMatch> {
    if token_count <= HP.ratio_min_tokens {
        return None;
    }
    let ratio = PERSONALITY_RE.find_iter(text).count() as f64 / token_count as f64;
    (ratio < HP.personal_voice_ratio)
        .then(|| structural("Lacks personal voice", HP.personal_voice_penalty))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `sentences` must come from [`crate::tokenize::split_sentences`] on the same
/// text. Sentence-level heuristics are skipped when there are no sentences, so
/// empty input scores 0.
pub fn detect_patterns<S: AsRef<str>>(text: &str, sentences: &[S]) -> PatternReport {
    let lengths = sentence_lengths(sentences);
    let token_count = whitespace_token_count(text);

    let mut matches = rule_phrases(text);
    matches.extend(
        [
            rule_uniformity(&lengths),
            rule_contractions(text, token_count),
            rule_passive_voice(text, sentences.len()),
            rule_formal_transitions(text),
            rule_sentence_length(&lengths),
            rule_personal_voice(text, token_count),
        ]
        .into_iter()
        .flatten(),
    );

    let raw: usize = matches
        .iter()
        .map(|m| m.weight as usize * m.occurrence_count)
        .sum();
    let score = raw.min(HP.score_max as usize) as u32;
    let explanations = matches.iter().map(PatternMatch::explanation).collect();

    PatternReport {
        score,
        explanations,
        matches,
    }
}
