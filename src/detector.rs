use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::error::DetectorError;
use crate::{AnalysisResult, ExternalDetection};

const FAKE_LABEL: &str = "Fake";

#[allow(async_fn_in_trait)]
pub trait AiDetector {
    async fn detect(&self, text: &str) -> Result<ExternalDetection, DetectorError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Error { error: String },
}

impl InferenceResponse {
    /// Score of the `Fake` label in the first result set, 0 when absent.
    fn fake_score(&self) -> Option<f64> {
        let scores = match self {
            Self::Nested(sets) => sets.first().map(Vec::as_slice).unwrap_or_default(),
            Self::Flat(scores) => scores.as_slice(),
            Self::Error { .. } => return None,
        };
        Some(
            scores
                .iter()
                .find(|s| s.label == FAKE_LABEL)
                .map_or(0.0, |s| s.score),
        )
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Hugging Face inference adapter
// ---------------------------------------------------------------------------

pub struct HuggingFaceDetector {
    client: Client,
    config: DetectorConfig,
}

impl HuggingFaceDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    async fn request(&self, input: &str) -> Result<ExternalDetection, DetectorError> {
        let body = InferenceRequest {
            inputs: input,
            options: InferenceOptions {
                wait_for_model: self.config.wait_for_model,
            },
        };
        let mut request = self.client.post(self.config.endpoint.as_str()).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        debug!(endpoint = %self.config.endpoint, chars = input.chars().count(), "submitting to detector");
        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        let parsed = serde_json::from_str::<InferenceResponse>(&raw);
        if let Ok(InferenceResponse::Error { error }) = &parsed {
            if error.to_lowercase().contains("loading") {
                return Err(DetectorError::ModelLoading {
                    message: error.clone(),
                });
            }
        }
        if !status.is_success() {
            return Err(DetectorError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }

        let parsed = parsed.map_err(DetectorError::decode)?;
        let probability = parsed
            .fake_score()
            .ok_or_else(|| DetectorError::decode(format!("error payload: {raw}")))?;

        Ok(ExternalDetection {
            probability: probability.clamp(0.0, 1.0),
            source: self.config.source.clone(),
            model: self.config.model.clone(),
        })
    }
}

impl AiDetector for HuggingFaceDetector {
    async fn detect(&self, text: &str) -> Result<ExternalDetection, DetectorError> {
        let input = truncate_chars(text, self.config.max_input_chars);
        let mut attempt = 0;
        loop {
            match self.request(input).await {
                Err(err) if err.is_loading() && attempt < self.config.loading_retries => {
                    attempt += 1;
                    warn!(attempt, "detector model loading, retrying");
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                other => return other,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Enhancement
// ---------------------------------------------------------------------------

fn absorb(
    outcome: Result<ExternalDetection, DetectorError>,
    mut result: AnalysisResult,
) -> AnalysisResult {
    match outcome {
        Ok(detection) => {
            info!(
                probability = detection.probability,
                source = %detection.source,
                "external detection available"
            );
            result.apply_detection(detection);
        }
        Err(err) => warn!("external detection unavailable: {err}"),
    }
    result
}

/// Augment an already-built analysis with an external verdict.
///
/// On success sets `external_detection` and `blended_flatness`; on any
/// failure returns `result` unchanged.
pub async fn enhance<D: AiDetector>(
    detector: &D,
    text: &str,
    result: AnalysisResult,
) -> AnalysisResult {
    let outcome = detector.detect(text).await;
    absorb(outcome, result)
}

/// [`enhance`] bounded by `limit`; a timeout counts as unavailable.
pub async fn enhance_within<D: AiDetector>(
    detector: &D,
    text: &str,
    result: AnalysisResult,
    limit: Duration,
) -> AnalysisResult {
    match tokio::time::timeout(limit, detector.detect(text)).await {
        Ok(outcome) => absorb(outcome, result),
        Err(_) => {
            warn!(?limit, "external detection timed out");
            result
        }
    }
}
