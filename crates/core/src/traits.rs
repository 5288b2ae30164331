use crate::error::ClassifyError;
use crate::models::InvocationPayload;
use async_trait::async_trait;

/// The seam between the pipeline and the external model service. Tests
/// substitute a scripted fake; production wires in the HTTP client once at
/// startup.
#[async_trait]
pub trait ModelInvoker {
    /// Sends one payload and returns the reply's text verbatim. An empty
    /// string means the reply carried no text block; it fails validation
    /// downstream rather than succeeding silently.
    async fn invoke(&self, payload: &InvocationPayload) -> Result<String, ClassifyError>;
}
