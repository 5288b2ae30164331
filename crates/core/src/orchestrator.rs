use crate::error::ClassifyError;
use crate::extractor;
use crate::models::{
    ClassificationResult, DocumentKind, ExtractionMethod, InvocationPayload, RawClassification,
    MAX_DOCUMENT_BYTES,
};
use crate::prompts::{build_text_prompt, build_vision_prompt};
use crate::traits::ModelInvoker;
use crate::validator::parse_classification;
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the whole extraction-and-classification pipeline for one document at
/// a time. Holds no mutable state; the invoker handle is built once at
/// startup and injected, so tests can substitute a scripted fake.
pub struct DocumentClassifier<I>
where
    I: ModelInvoker,
{
    invoker: I,
}

impl<I> DocumentClassifier<I>
where
    I: ModelInvoker + Send + Sync,
{
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// Classifies one document into a type label with confidence.
    ///
    /// Images go straight to the vision path. PDFs try text extraction
    /// first and fall back to the native-document visual path when no
    /// usable text comes out. A reply that fails validation is re-requested
    /// exactly once; transport and timeout failures are terminal.
    pub async fn classify(
        &self,
        content: &[u8],
        mime_type: &str,
    ) -> Result<ClassificationResult, ClassifyError> {
        let started = Instant::now();

        let kind = DocumentKind::from_mime(mime_type).ok_or_else(|| {
            ClassifyError::UnsupportedInput(format!("unsupported mime type: {mime_type}"))
        })?;

        if content.len() > MAX_DOCUMENT_BYTES {
            return Err(ClassifyError::UnsupportedInput(format!(
                "document is {} bytes, limit is {MAX_DOCUMENT_BYTES}",
                content.len()
            )));
        }

        let digest = content_digest(content);

        let (payload, method) = if kind.is_image() {
            debug!(document = %digest, media_type = kind.media_type(), "image input, vision path");
            (
                InvocationPayload::Image {
                    media_type: kind.media_type(),
                    data: STANDARD.encode(content),
                    prompt: build_vision_prompt(),
                },
                ExtractionMethod::Vision,
            )
        } else {
            match extractor::extract_text(content) {
                Some(text) => {
                    debug!(
                        document = %digest,
                        chars = text.chars().count(),
                        "pdf text extracted, text path"
                    );
                    (
                        InvocationPayload::Text {
                            prompt: build_text_prompt(&text),
                        },
                        ExtractionMethod::Text,
                    )
                }
                None => {
                    debug!(document = %digest, "no extractable pdf text, native document path");
                    (
                        InvocationPayload::PdfDocument {
                            data: STANDARD.encode(content),
                            prompt: build_vision_prompt(),
                        },
                        ExtractionMethod::Vision,
                    )
                }
            }
        };

        let raw = self.invoke_validated(&payload, &digest).await?;

        let result = ClassificationResult {
            label: raw.label,
            confidence: raw.confidence,
            reasoning: raw.reasoning,
            extraction_method: method,
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            document = %digest,
            label = %result.label,
            confidence = result.confidence,
            method = ?result.extraction_method,
            elapsed_ms = result.processing_time_ms,
            "classification complete"
        );

        Ok(result)
    }

    /// One invocation plus validation, with a single retry of the same
    /// payload when the reply is malformed. Other error kinds propagate
    /// untouched so timeout budgets never compound.
    async fn invoke_validated(
        &self,
        payload: &InvocationPayload,
        digest: &str,
    ) -> Result<RawClassification, ClassifyError> {
        let reply = self.invoker.invoke(payload).await?;

        match parse_classification(&reply) {
            Ok(raw) => Ok(raw),
            Err(error) if error.is_malformed_response() => {
                warn!(document = %digest, %error, "model reply failed validation, retrying once");
                let retry_reply = self.invoker.invoke(payload).await?;
                parse_classification(&retry_reply)
            }
            Err(error) => Err(error),
        }
    }
}

fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}
