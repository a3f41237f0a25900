use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::error;

use off_script::terrain::{self, TerrainPoint};
use off_script::{analyze, enhance_within, AnalysisResult, DetectorConfig, HuggingFaceDetector};

#[derive(Parser)]
#[command(
    name = "off-script",
    about = "Score prose for AI-style flatness",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Blend in the verdict of the external AI detector
    #[arg(long)]
    detect: bool,

    /// Include the terrain height-field in the output
    #[arg(long)]
    terrain: bool,

    /// JSON file with detector settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the detector endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the detector timeout
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Bearer token for the detector endpoint
    #[arg(long, env = "OFF_SCRIPT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    terrain: Option<Vec<TerrainPoint>>,
}

impl Cli {
    fn detector_config(&self) -> Result<DetectorConfig, off_script::ConfigError> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_file(path)?,
            None => DetectorConfig::default(),
        };
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if self.api_token.is_some() {
            config.api_token = self.api_token.clone();
        }
        Ok(config)
    }
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<String>, String> {
    if files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(|e| format!("Error reading stdin: {e}"))?;
        return Ok(vec![input]);
    }
    files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .map_err(|e| format!("Error reading {}: {e}", path.display()))
        })
        .collect()
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let inputs = match read_inputs(&cli.files) {
        Ok(inputs) => inputs,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let detector = if cli.detect {
        let built = cli
            .detector_config()
            .map_err(|e| e.to_string())
            .and_then(|config| HuggingFaceDetector::new(config).map_err(|e| e.to_string()));
        match built {
            Ok(detector) => Some(detector),
            Err(msg) => {
                error!("Detector unavailable: {msg}");
                None
            }
        }
    } else {
        None
    };

    for text in &inputs {
        let mut analysis = analyze(text);
        if let Some(detector) = &detector {
            let limit = detector.config().timeout();
            analysis = enhance_within(detector, text, analysis, limit).await;
        }
        let report = Report {
            terrain: cli.terrain.then(|| terrain::from_text(text)),
            analysis,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
