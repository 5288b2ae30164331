use crate::error::ClassifyError;
use crate::models::InvocationPayload;
use crate::traits::ModelInvoker;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

/// Output is always one small fixed-schema JSON object, so the token cap is
/// configuration, not a request-time choice.
pub const MAX_OUTPUT_TOKENS: u32 = 128;

/// Hard per-attempt budget. Elapse aborts the in-flight call; retry policy
/// lives in the orchestrator so timeout budgets never compound here.
pub const INVOCATION_TIMEOUT: Duration = Duration::from_millis(6000);

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct InvokerConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl InvokerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            timeout: INVOCATION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ReplyBlock>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReplyBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Messages-API client shared by every request for the process lifetime.
pub struct AnthropicInvoker {
    client: Client,
    messages_url: Url,
    config: InvokerConfig,
}

impl AnthropicInvoker {
    pub fn new(config: InvokerConfig) -> Result<Self, ClassifyError> {
        let messages_url = Url::parse(&config.endpoint)?.join("/v1/messages")?;

        Ok(Self {
            client: Client::new(),
            messages_url,
            config,
        })
    }

    async fn send(&self, body: &Value) -> Result<String, ClassifyError> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifyError::InvocationFailed(format!(
                "model endpoint returned {}",
                response.status()
            )));
        }

        let reply: MessagesReply = response.json().await?;
        Ok(reply_text(&reply))
    }
}

#[async_trait]
impl ModelInvoker for AnthropicInvoker {
    async fn invoke(&self, payload: &InvocationPayload) -> Result<String, ClassifyError> {
        let body = request_body(&self.config, payload);
        let started = Instant::now();

        match tokio::time::timeout(self.config.timeout, self.send(&body)).await {
            Ok(sent) => sent,
            Err(_) => Err(ClassifyError::InvocationTimeout {
                elapsed_ms: started.elapsed().as_millis() as u64,
            }),
        }
    }
}

/// Builds the request body for any modality. Payload construction is the
/// only thing that varies; the send path is shared.
fn request_body(config: &InvokerConfig, payload: &InvocationPayload) -> Value {
    let content = match payload {
        InvocationPayload::Text { prompt } => json!(prompt),
        InvocationPayload::Image {
            media_type,
            data,
            prompt,
        } => json!([
            {
                "type": "image",
                "source": {"type": "base64", "media_type": media_type, "data": data},
            },
            {"type": "text", "text": prompt},
        ]),
        InvocationPayload::PdfDocument { data, prompt } => json!([
            {
                "type": "document",
                "source": {"type": "base64", "media_type": "application/pdf", "data": data},
            },
            {"type": "text", "text": prompt},
        ]),
    };

    json!({
        "model": config.model,
        "max_tokens": config.max_tokens,
        "messages": [{"role": "user", "content": content}],
    })
}

fn reply_text(reply: &MessagesReply) -> String {
    reply
        .content
        .iter()
        .find_map(|block| {
            if block.kind == "text" {
                block.text.clone()
            } else {
                None
            }
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{reply_text, request_body, InvokerConfig, MessagesReply, ReplyBlock};
    use crate::models::InvocationPayload;

    fn config() -> InvokerConfig {
        InvokerConfig::new("test-key")
    }

    #[test]
    fn text_payload_sends_the_prompt_as_plain_content() {
        let body = request_body(
            &config(),
            &InvocationPayload::Text {
                prompt: "classify this".to_string(),
            },
        );

        assert_eq!(body["model"], "claude-haiku-4-5-20251001");
        assert_eq!(body["max_tokens"], 128);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "classify this");
    }

    #[test]
    fn image_payload_carries_base64_block_then_prompt() {
        let body = request_body(
            &config(),
            &InvocationPayload::Image {
                media_type: "image/png",
                data: "aGVsbG8=".to_string(),
                prompt: "look at this".to_string(),
            },
        );

        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "base64");
        assert_eq!(content[0]["source"]["media_type"], "image/png");
        assert_eq!(content[0]["source"]["data"], "aGVsbG8=");
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "look at this");
    }

    #[test]
    fn pdf_payload_uses_a_document_block() {
        let body = request_body(
            &config(),
            &InvocationPayload::PdfDocument {
                data: "JVBERi0=".to_string(),
                prompt: "look at this".to_string(),
            },
        );

        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "document");
        assert_eq!(content[0]["source"]["media_type"], "application/pdf");
        assert_eq!(content[1]["text"], "look at this");
    }

    #[test]
    fn reply_text_takes_the_first_text_bearing_block() {
        let reply = MessagesReply {
            content: vec![
                ReplyBlock {
                    kind: "tool_use".to_string(),
                    text: None,
                },
                ReplyBlock {
                    kind: "text".to_string(),
                    text: Some("{\"label\": \"Receipt\"}".to_string()),
                },
            ],
        };

        assert_eq!(reply_text(&reply), "{\"label\": \"Receipt\"}");
    }

    #[test]
    fn reply_without_text_block_yields_empty_string() {
        let reply = MessagesReply { content: vec![] };
        assert_eq!(reply_text(&reply), "");
    }
}
