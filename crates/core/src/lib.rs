pub mod error;
pub mod extractor;
pub mod invoker;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod traits;
pub mod validator;

pub use error::ClassifyError;
pub use extractor::{
    extract_text, LopdfExtractor, PdfTextExtractor, MAX_TEXT_CHARS, MIN_TEXT_CHARS,
};
pub use invoker::{
    AnthropicInvoker, InvokerConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, INVOCATION_TIMEOUT,
    MAX_OUTPUT_TOKENS,
};
pub use models::{
    ClassificationResult, DocumentKind, ExtractionMethod, InvocationPayload, RawClassification,
    MAX_DOCUMENT_BYTES,
};
pub use orchestrator::DocumentClassifier;
pub use prompts::{build_text_prompt, build_vision_prompt};
pub use traits::ModelInvoker;
pub use validator::parse_classification;
