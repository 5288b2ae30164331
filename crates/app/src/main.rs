use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use doc_classify_core::{
    AnthropicInvoker, ClassificationResult, DocumentClassifier, InvokerConfig, DEFAULT_ENDPOINT,
    DEFAULT_MODEL, MAX_DOCUMENT_BYTES,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doc-classify", version)]
struct Cli {
    /// Document to classify (PDF, PNG, or JPG).
    file: PathBuf,

    /// MIME type override; inferred from the file extension when omitted.
    #[arg(long)]
    mime_type: Option<String>,

    /// API key for the model endpoint.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model identifier used for every classification call.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the model endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

/// Envelope the caller-facing surface serializes around the pipeline result.
#[derive(Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ClassificationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn mime_for_extension(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "doc-classify boot"
    );

    let mime_type = match &cli.mime_type {
        Some(mime) => mime.clone(),
        None => mime_for_extension(&cli.file)
            .context("unable to infer mime type from the file extension; pass --mime-type")?
            .to_string(),
    };

    let content = std::fs::read(&cli.file)
        .with_context(|| format!("unable to read {}", cli.file.display()))?;

    if content.len() > MAX_DOCUMENT_BYTES {
        anyhow::bail!(
            "file is {} bytes, maximum size is {MAX_DOCUMENT_BYTES} bytes (4.5 MiB)",
            content.len()
        );
    }

    let mut config = InvokerConfig::new(cli.api_key);
    config.model = cli.model;
    config.endpoint = cli.endpoint;

    let invoker =
        AnthropicInvoker::new(config).map_err(|error| anyhow::anyhow!(error.to_string()))?;
    let classifier = DocumentClassifier::new(invoker);

    match classifier.classify(&content, &mime_type).await {
        Ok(result) => {
            let envelope = ApiResponse {
                success: true,
                result: Some(result),
                error: None,
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
        Err(error) => {
            let envelope = ApiResponse {
                success: false,
                result: None,
                error: Some(error.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            std::process::exit(1);
        }
    }
}
