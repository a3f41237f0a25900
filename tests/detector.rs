use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use off_script::{
    analyze, enhance, enhance_within, AiDetector, DetectorConfig, DetectorError,
    ExternalDetection, HuggingFaceDetector,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

// --- Mock detectors ---

struct Fixed(f64);

impl AiDetector for Fixed {
    async fn detect(&self, _text: &str) -> Result<ExternalDetection, DetectorError> {
        Ok(ExternalDetection {
            probability: self.0,
            source: "mock".to_string(),
            model: "fixed".to_string(),
        })
    }
}

struct Offline;

impl AiDetector for Offline {
    async fn detect(&self, _text: &str) -> Result<ExternalDetection, DetectorError> {
        Err(DetectorError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        })
    }
}

struct Slow;

impl AiDetector for Slow {
    async fn detect(&self, _text: &str) -> Result<ExternalDetection, DetectorError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Fixed(1.0).detect("").await
    }
}

// --- Mock inference server ---

#[derive(Default)]
struct Seen {
    inputs: Mutex<Vec<String>>,
    auth: Mutex<Option<String>>,
    flaky_calls: AtomicUsize,
}

fn loading_body() -> Value {
    json!({ "error": "Model roberta-base-openai-detector is currently loading", "estimated_time": 20.0 })
}

async fn spawn_server(seen: Arc<Seen>) -> String {
    let ok_state = seen.clone();
    let flaky_state = seen.clone();
    let app = Router::new()
        .route(
            "/ok",
            post(move |headers: HeaderMap, Json(payload): Json<Value>| {
                let state = ok_state.clone();
                async move {
                    let inputs = payload["inputs"].as_str().unwrap_or_default().to_string();
                    state.inputs.lock().unwrap().push(inputs);
                    *state.auth.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    Json(json!([[
                        { "label": "Real", "score": 0.25 },
                        { "label": "Fake", "score": 0.75 }
                    ]]))
                }
            }),
        )
        .route(
            "/no-fake",
            post(|| async { Json(json!([[{ "label": "Real", "score": 0.9 }]])) }),
        )
        .route(
            "/loading",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(loading_body())) }),
        )
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/flaky",
            post(move || {
                let state = flaky_state.clone();
                async move {
                    if state.flaky_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::SERVICE_UNAVAILABLE, Json(loading_body()))
                    } else {
                        (
                            StatusCode::OK,
                            Json(json!([[{ "label": "Fake", "score": 0.5 }]])),
                        )
                    }
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

fn config_for(endpoint: String) -> DetectorConfig {
    DetectorConfig {
        endpoint,
        timeout_secs: 5,
        retry_delay_ms: 10,
        ..Default::default()
    }
}

// --- Enhancement contract ---

#[tokio::test]
async fn blends_seventy_thirty() {
    let mut base = analyze("Some ordinary words in a sentence.");
    base.flatness = 50;
    let enhanced = enhance(&Fixed(1.0), "ignored", base).await;
    assert_eq!(enhanced.blended_flatness, Some(65));
    assert_eq!(enhanced.flatness, 50);
    assert_eq!(enhanced.external_detection.unwrap().probability, 1.0);
}

#[tokio::test]
async fn failure_leaves_result_untouched() {
    let base = analyze("Some ordinary words in a sentence.");
    let enhanced = enhance(&Offline, "text", base.clone()).await;
    assert_eq!(enhanced, base);
    assert!(enhanced.external_detection.is_none());
    assert!(enhanced.blended_flatness.is_none());
}

#[tokio::test]
async fn timeout_counts_as_unavailable() {
    let base = analyze("A sentence.");
    let enhanced = enhance_within(&Slow, "text", base.clone(), Duration::from_millis(20)).await;
    assert_eq!(enhanced, base);
}

// --- HTTP adapter ---

#[tokio::test]
async fn extracts_fake_probability_and_truncates_input() {
    let seen = Arc::new(Seen::default());
    let base_url = spawn_server(seen.clone()).await;
    let mut config = config_for(format!("{}/ok", base_url));
    config.max_input_chars = 10;
    config.api_token = Some("secret".to_string());
    let detector = HuggingFaceDetector::new(config).unwrap();

    let detection = detector.detect("ééééééééééééééééééé tail").await.unwrap();
    assert_eq!(detection.probability, 0.75);
    assert_eq!(detection.source, "huggingface");
    assert_eq!(detection.model, "roberta-base-openai-detector");

    let inputs = seen.inputs.lock().unwrap().clone();
    assert_eq!(inputs, vec!["é".repeat(10)]);
    assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn missing_fake_label_means_zero() {
    let base_url = spawn_server(Arc::new(Seen::default())).await;
    let detector = HuggingFaceDetector::new(config_for(format!("{}/no-fake", base_url))).unwrap();
    let detection = detector.detect("text").await.unwrap();
    assert_eq!(detection.probability, 0.0);
}

#[tokio::test]
async fn loading_model_is_reported() {
    let base_url = spawn_server(Arc::new(Seen::default())).await;
    let detector = HuggingFaceDetector::new(config_for(format!("{}/loading", base_url))).unwrap();
    let err = detector.detect("text").await.unwrap_err();
    assert!(err.is_loading(), "unexpected error: {err}");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base_url = spawn_server(Arc::new(Seen::default())).await;
    let detector = HuggingFaceDetector::new(config_for(format!("{}/broken", base_url))).unwrap();
    match detector.detect("text").await {
        Err(DetectorError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn loading_retry_is_opt_in() {
    let seen = Arc::new(Seen::default());
    let base_url = spawn_server(seen.clone()).await;

    let detector = HuggingFaceDetector::new(config_for(format!("{}/flaky", base_url))).unwrap();
    assert!(detector.detect("text").await.is_err());

    let mut config = config_for(format!("{}/flaky", base_url));
    config.loading_retries = 2;
    let retrying = HuggingFaceDetector::new(config).unwrap();
    seen.flaky_calls.store(0, Ordering::SeqCst);
    let detection = retrying.detect("text").await.unwrap();
    assert_eq!(detection.probability, 0.5);
    assert_eq!(seen.flaky_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreachable_endpoint_degrades_gracefully() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let detector =
        HuggingFaceDetector::new(config_for(format!("http://127.0.0.1:{}/gone", port))).unwrap();
    let base = analyze("Nothing to see here.");
    let enhanced = enhance(&detector, "Nothing to see here.", base.clone()).await;
    assert_eq!(enhanced, base);
    assert_eq!(enhanced.flatness, base.flatness);
}
