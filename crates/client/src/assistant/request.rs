//! generateContent request body.

use serde::Serialize;

use super::AssistantError;

/// Longest question accepted, in characters.
pub const MAX_QUESTION_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self { parts: vec![Part { text: text.to_string() }] }
    }
}

/// One question plus the persona as system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
}

impl GenerateRequest {
    /// The question is sent as typed; only blank or oversized input is
    /// rejected.
    pub fn new(question: &str, persona: &str) -> Result<Self, AssistantError> {
        if question.trim().is_empty() {
            return Err(AssistantError::InvalidQuestion("question must not be empty".into()));
        }

        let chars = question.chars().count();
        if chars > MAX_QUESTION_CHARS {
            return Err(AssistantError::InvalidQuestion(format!(
                "question too long: {chars} characters (max {MAX_QUESTION_CHARS})"
            )));
        }

        Ok(Self { contents: vec![Content::text(question)], system_instruction: Content::text(persona) })
    }
}
