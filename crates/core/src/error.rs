use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("model call timed out after {elapsed_ms}ms")]
    InvocationTimeout { elapsed_ms: u64 },

    #[error("model call failed: {0}")]
    InvocationFailed(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl ClassifyError {
    /// The only kind the orchestrator retries.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}

pub type Result<T, E = ClassifyError> = std::result::Result<T, E>;
