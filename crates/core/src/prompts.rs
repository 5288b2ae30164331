//! Instruction prompts for the classification calls.
//!
//! Both modalities share one rules block and one output contract so the
//! validator can treat every reply uniformly: the model is always asked for
//! the same three-key JSON object, whichever channel carried the document.

const CLASSIFICATION_RULES: &str = r#"## Rules:
- Determine the most specific document type you can (e.g. "Electric Bill", "W-2 Tax Form", "Auto Insurance Policy", "Bank Statement")
- Provide a short label (2-4 words)
- Confidence should reflect how certain you are (0.0 = uncertain, 1.0 = certain)
- Keep reasoning to 1 sentence"#;

const OUTPUT_CONTRACT: &str = r#"Respond with ONLY valid JSON, no markdown fences:
{"label": "Document Type", "confidence": 0.95, "reasoning": "Brief explanation"}"#;

/// Prompt for the extracted-text path. Embeds the document text verbatim.
pub fn build_text_prompt(content: &str) -> String {
    format!(
        "You are a document classifier. Analyze the document content below. \
Identify the document type based on keywords, structure, and context.\n\n\
{CLASSIFICATION_RULES}\n\n\
## Document Content:\n\
{content}\n\n\
{OUTPUT_CONTRACT}"
    )
}

/// Prompt for the visual path (images and native PDF documents). The
/// document itself travels as a separate payload block, never inline here.
pub fn build_vision_prompt() -> String {
    format!(
        "You are a document classifier. Look at the document image(s) and \
identify the document type based on visual layout, logos, text, and structure.\n\n\
{CLASSIFICATION_RULES}\n\n\
{OUTPUT_CONTRACT}"
    )
}
