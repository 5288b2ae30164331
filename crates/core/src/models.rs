use serde::{Deserialize, Serialize};

/// Largest document accepted by the pipeline (4.5 MiB). Callers are expected
/// to pre-validate, and `classify` re-checks before touching the bytes.
pub const MAX_DOCUMENT_BYTES: usize = 4_718_592;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Png,
    Jpeg,
}

impl DocumentKind {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }
}

/// Which channel carried the document content to the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Text,
    Vision,
}

/// One model invocation's payload. The three modalities share a single call
/// shape downstream; only the payload construction differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationPayload {
    Text {
        prompt: String,
    },
    Image {
        media_type: &'static str,
        data: String,
        prompt: String,
    },
    PdfDocument {
        data: String,
        prompt: String,
    },
}

/// The validated shape of one model reply, before timing and method metadata
/// are attached. Confidence is already clamped to [0.0, 1.0].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawClassification {
    pub label: String,
    pub confidence: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f64,
    pub reasoning: String,
    pub extraction_method: ExtractionMethod,
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::{ClassificationResult, DocumentKind, ExtractionMethod};

    #[test]
    fn mime_parsing_accepts_the_three_supported_types() {
        assert_eq!(
            DocumentKind::from_mime("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), Some(DocumentKind::Png));
        assert_eq!(
            DocumentKind::from_mime(" IMAGE/JPEG "),
            Some(DocumentKind::Jpeg)
        );
        assert_eq!(DocumentKind::from_mime("image/gif"), None);
        assert_eq!(DocumentKind::from_mime(""), None);
    }

    #[test]
    fn result_serializes_with_camel_case_wire_names() {
        let result = ClassificationResult {
            label: "Electric Bill".to_string(),
            confidence: 0.9,
            reasoning: "Utility header".to_string(),
            extraction_method: ExtractionMethod::Vision,
            processing_time_ms: 42,
        };

        let value = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(value["extractionMethod"], "vision");
        assert_eq!(value["processingTimeMs"], 42);
        assert_eq!(value["label"], "Electric Bill");
    }
}
