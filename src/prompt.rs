use serde::Serialize;

use crate::config::AppConfig;

pub const SYSTEM_PERSONA: &str =
    "You are a university professor who is an expert in active learning and retrieval practice.";

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Body of the chat-completion request sent upstream.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

pub fn user_prompt(text: &str) -> String {
    format!(
        "Write ONE single clear, concrete and challenging question for a university student, \
based exclusively on the following text.\n\
The question must encourage reflection and active retrieval of the information.\n\
Do not include the answer. Do not include lists. Only one question.\n\
\n\
Text:\n\
{text}\n\
\n\
Question:"
    )
}

impl<'a> ChatRequest<'a> {
    pub fn new(config: &'a AppConfig, prompt: &'a str) -> Self {
        Self {
            model: &config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PERSONA,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}
