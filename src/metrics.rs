use std::collections::HashSet;

use crate::tokenize::whitespace_tokens;

/// Distinct words over total words; 0 for an empty slice.
pub fn lexical_diversity<S: AsRef<str>>(words: &[S]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = words.iter().map(|w| w.as_ref()).collect();
    unique.len() as f64 / words.len() as f64
}

pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

pub fn sentence_lengths<S: AsRef<str>>(sentences: &[S]) -> Vec<f64> {
    sentences
        .iter()
        .map(|s| whitespace_tokens(s.as_ref()).len() as f64)
        .collect()
}

pub fn sentence_length_std_dev<S: AsRef<str>>(sentences: &[S]) -> f64 {
    population_std_dev(&sentence_lengths(sentences))
}

// Complexity is the mean char length of a sentence's whitespace tokens.
pub fn burstiness<S: AsRef<str>>(sentences: &[S]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let complexities: Vec<f64> = sentences
        .iter()
        .map(|s| {
            let tokens = whitespace_tokens(s.as_ref());
            let total: usize = tokens.iter().map(|t| t.chars().count()).sum();
            total as f64 / tokens.len().max(1) as f64
        })
        .collect();
    let mean = complexities.iter().sum::<f64>() / complexities.len() as f64;
    population_std_dev(&complexities) / mean.max(1.0)
}
