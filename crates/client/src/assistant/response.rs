//! generateContent response and error bodies.

use serde::Deserialize;

/// Raw response; only the parts needed for the reply text are modelled.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default, alias = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiErrorBody {
    /// `error.message` if the body has one, else `API Error: {status}`.
    pub fn message_or(bytes: &[u8], status: u16) -> String {
        serde_json::from_slice::<ApiErrorBody>(bytes)
            .ok()
            .and_then(|body| body.error)
            .and_then(|detail| detail.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("API Error: {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "I have **3 years** at `AWS`." }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_text(), Some("I have **3 years** at `AWS`."));
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_missing_text() {
        for raw in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#,
        ] {
            let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(resp.first_text(), None, "{raw}");
        }
    }

    #[test]
    fn test_error_message() {
        let body = br#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(ApiErrorBody::message_or(body, 400), "API key not valid.");
        assert_eq!(ApiErrorBody::message_or(b"<html>bad gateway</html>", 502), "API Error: 502");
        assert_eq!(ApiErrorBody::message_or(br#"{"error": {}}"#, 500), "API Error: 500");
    }
}
