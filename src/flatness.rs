// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    diversity_cap: f64,
    std_dev_cap: f64,
    burstiness_cap: f64,
    diversity_weight: f64,
    variance_weight: f64,
    burstiness_weight: f64,
    pattern_weight: f64,
    statistical_share: f64,
    external_share: f64,
    score_max: u32,
}

static HP: Hyperparameters = Hyperparameters {
    diversity_cap: 0.6,
    std_dev_cap: 8.0,
    burstiness_cap: 0.25,
    diversity_weight: 0.25,
    variance_weight: 0.20,
    burstiness_weight: 0.20,
    pattern_weight: 0.35,
    statistical_share: 0.7,
    external_share: 0.3,
    score_max: 100,
};

/// `1 - min(value / cap, 1)`: more variation means less flatness.
fn inverted(value: f64, cap: f64) -> f64 {
    1.0 - (value.max(0.0) / cap).min(1.0)
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, HP.score_max as f64) as u32
}

/// Combine whole-text signals into the 0..=100 flatness index.
pub fn flatness(diversity: f64, std_dev: f64, burstiness: f64, pattern_score: u32) -> u32 {
    let diversity_score = inverted(diversity.min(1.0), HP.diversity_cap);
    let variance_score = inverted(std_dev, HP.std_dev_cap);
    let burstiness_score = inverted(burstiness, HP.burstiness_cap);
    let pattern = pattern_score.min(HP.score_max) as f64 / 100.0;

    let combined = diversity_score * HP.diversity_weight
        + variance_score * HP.variance_weight
        + burstiness_score * HP.burstiness_weight
        + pattern * HP.pattern_weight;
    to_score(combined * 100.0)
}

/// Blend statistical flatness with an external AI probability (70/30).
pub fn blend(flatness: u32, probability: f64) -> u32 {
    let probability = probability.clamp(0.0, 1.0);
    to_score(flatness as f64 * HP.statistical_share + probability * 100.0 * HP.external_share)
}
