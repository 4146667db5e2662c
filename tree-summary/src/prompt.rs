//! Summary prompt and the single model call made per source file.

use model::{ChatMessage, ChatRequest, ModelProvider, ModelResult};
use tracing::{debug, info};

const SUMMARY_INSTRUCTIONS: &str = "\
Analyze the content of the file below and write a technical summary as bullet points.

Requirements:
- List the main items: functions, hooks, components (for React/React Native), classes (for Python).
- Describe each item in one short line about its main responsibility.
- Do not describe internal details.
- Do not add anything that is not in the file.
- Output only bullet points.
- Include the main purpose of the file.";

/// Builds the full prompt: instructions, the requested output language, then
/// the file content.
pub fn build_prompt(content: &str, language: &str) -> String {
    format!(
        "{}\n- Write the bullet points in {}.\n\nFile content:\n\n{}",
        SUMMARY_INSTRUCTIONS, language, content
    )
}

/// Asks the model for a bullet summary of one file. One request, no retry.
pub async fn summarize_file(
    provider: &dyn ModelProvider,
    model: &str,
    language: &str,
    content: &str,
    file_name: &str,
) -> ModelResult<String> {
    debug!("Requesting summary for {} from {}", file_name, provider.provider_name());

    let request = ChatRequest::new(model, vec![ChatMessage::user(build_prompt(content, language))]);
    let response = provider.chat(request).await?;

    // No text back is an empty summary, not a failure.
    let summary = response.text().unwrap_or_default().trim().to_string();
    info!("Summary for {}:\n{}", file_name, summary);
    Ok(summary)
}
