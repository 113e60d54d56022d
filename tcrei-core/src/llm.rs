//! # Generative model client
//!
//! A thin wrapper over an OpenAI-compatible completions endpoint, used for
//! two things: scoring a prompt against the TCREI framework and producing
//! the next turn of a chat. The caller supplies the endpoint settings; all
//! failures come back as error values for the caller to surface.

use crate::chat::{Message as ChatMessage, Role};
use crate::i18n::Locale;
use rig::client::CompletionClient;
use rig::completion::{AssistantContent, CompletionError, CompletionModelDyn, Message};
use rig::providers::openai::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ANALYSIS_SYSTEM_INSTRUCTION: &str = "\
You are an expert AI prompt engineering coach. Your goal is to analyze a user's prompt based on the T.C.R.E.I. framework (Task, Context, References, Evaluation, Iteration).
- Task: Is the action for the AI clear and specific? Is there a persona? Is the format defined?
- Context: Is there enough background information for the AI to understand the request?
- References: Are there examples (few-shot) to guide the AI?
- Evaluation: Does the prompt encourage a verifiable and unbiased response?
- Iteration: Is the prompt structured in a way that is easy to refine?

Provide a concise analysis and a rewritten, improved prompt. Be encouraging and helpful. Respond ONLY with a JSON object with these keys: \
\"score\" (an integer from 0 to 100), \"strengths\" (an array of 2-3 strings), \"improvements\" (an array of 2-3 strings), and \"rewrittenPrompt\" (a string).";

const CHAT_SYSTEM_INSTRUCTION: &str =
    "You are a helpful and friendly AI assistant. Keep your responses concise and to the point.";

/// The structured result of scoring a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptAnalysis {
    /// Quality score from 0 to 100.
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub rewritten_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_rewritten_prompt: Option<String>,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("completion request failed: {0}")]
    Completion(#[from] CompletionError),
    #[error("model returned a malformed analysis: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Sends one completion request and extracts the text of the first choice.
pub async fn get_completions_content(
    api_key: &str,
    base_url: &str,
    model_name: &str,
    preamble: Option<&str>,
    prompt: &str,
) -> Result<String, CompletionError> {
    let client = Client::builder(api_key)
        .base_url(base_url)
        .build()
        .map_err(|err| {
            CompletionError::ResponseError(format!("Failed to build completion client: {err:?}"))
        })?;

    let model = client
        .completion_model(model_name)
        .completions_api();

    let mut request = model.completion_request(Message::from(prompt));
    if let Some(preamble) = preamble {
        request = request.preamble(preamble.to_string());
    }
    let response = request.send().await?;

    match response.choice.first() {
        AssistantContent::Text(t) => Ok(t.text.clone()),
        _ => Err(CompletionError::ResponseError(
            "Expected text response, but got tool call or reasoning".to_string(),
        )),
    }
}

/// Scores a prompt against the TCREI framework.
///
/// For non-English locales the model is additionally asked to translate the
/// rewritten prompt into the locale's language.
pub async fn analyze_prompt(
    api_key: &str,
    base_url: &str,
    model_name: &str,
    prompt: &str,
    locale: Locale,
) -> Result<PromptAnalysis, AnalysisError> {
    let mut instruction = ANALYSIS_SYSTEM_INSTRUCTION.to_string();
    if locale != Locale::En {
        instruction.push_str(&format!(
            "\n\nFinally, translate the \"rewrittenPrompt\" field into {} and put it in the \"translatedRewrittenPrompt\" field.",
            locale.english_name()
        ));
    }

    let content = get_completions_content(
        api_key,
        base_url,
        model_name,
        Some(&instruction),
        &format!("Analyze the following prompt: \"{prompt}\""),
    )
    .await?;

    Ok(serde_json::from_str(strip_code_fences(&content))?)
}

/// Requests the next model turn for a conversation.
///
/// The endpoint is a plain completions API, so the history is flattened into
/// a transcript and the model is asked to continue it.
pub async fn chat_reply(
    api_key: &str,
    base_url: &str,
    model_name: &str,
    messages: &[ChatMessage],
) -> Result<String, CompletionError> {
    let mut transcript = String::new();
    for message in messages {
        let speaker = match message.role {
            Role::User => "User",
            Role::Model => "Assistant",
        };
        transcript.push_str(speaker);
        transcript.push_str(": ");
        transcript.push_str(&message.text);
        transcript.push('\n');
    }
    transcript.push_str("Assistant:");

    get_completions_content(
        api_key,
        base_url,
        model_name,
        Some(CHAT_SYSTEM_INSTRUCTION),
        &transcript,
    )
    .await
}

/// Models often wrap JSON replies in markdown code fences; strip them.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}
