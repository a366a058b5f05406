//! assistant_ask tool implementation.
//!
//! Asks the portfolio assistant and hands back the reply together with the
//! rendered lines and the reveal pace a chat front end should use. API
//! failures are answered as a notice, never as a tool error.

use folio_client::{AssistantClient, AssistantError};
use folio_core::reveal::{Line, render};
use folio_core::{AppConfig, Error, RevealPace, Theme};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for assistant_ask tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssistantAskParams {
    /// The visitor's question.
    pub question: String,

    /// Theme for span colours (default: the configured theme).
    #[serde(default)]
    pub theme: Option<Theme>,
}

/// Output structure for assistant_ask tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssistantAskOutput {
    /// Reply text, or the notice that replaces it.
    pub text: String,
    /// True when `text` is a notice about a failed request.
    pub is_notice: bool,
    pub pace: RevealPace,
    /// Reveal tick interval for `text`, in milliseconds.
    pub interval_ms: u64,
    pub lines: Vec<Line>,
}

/// Implementation of the assistant_ask tool.
pub async fn ask_impl(
    assistant: Option<&AssistantClient>, config: &AppConfig, params: AssistantAskParams,
) -> Result<CallToolResult, McpError> {
    if params.question.trim().is_empty() {
        return Err(Error::InvalidInput("question cannot be empty".into()).into());
    }

    let result = match assistant {
        Some(client) => client.ask(&params.question).await,
        None => Err(AssistantError::MissingApiKey),
    };

    let (text, pace) = match result {
        Ok(reply) => (reply, RevealPace::Reply),
        Err(AssistantError::InvalidQuestion(msg)) => return Err(Error::InvalidInput(msg).into()),
        Err(e) => {
            tracing::warn!(error = %e, "assistant request failed");
            (e.user_message(), RevealPace::Notice)
        }
    };

    let theme = params.theme.unwrap_or(config.theme);
    json_result(&AssistantAskOutput {
        lines: render(&text, theme),
        is_notice: pace == RevealPace::Notice,
        interval_ms: config.reveal_interval(pace).as_millis() as u64,
        pace,
        text,
    })
}
