use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;

use super::assistant::{
    spawn_reply, system_instruction, Assistant, EMPTY_REPLY, MISSING_KEY_REPLY, UNAVAILABLE_REPLY,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateRequest {
    fn new(question: String, context: Option<&str>) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction(context),
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: question }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Text of the first candidate, `None` when it is missing or blank
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Assistant backed by the Gemini `generateContent` endpoint
pub struct GeminiAssistant {
    config: AssistantConfig,
    agent: ureq::Agent,
}

impl GeminiAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        if !config.has_credentials() {
            log::warn!("No API key configured, the chat assistant will stay silent");
        }
        Self { config, agent }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

fn generate(agent: &ureq::Agent, url: &str, api_key: &str, request: &GenerateRequest) -> Result<Option<String>> {
    let response: GenerateResponse = agent
        .post(url)
        .query("key", api_key)
        .send_json(request)
        .with_context(|| format!("POST {}", url))?
        .into_json()
        .context("Failed to decode generateContent response")?;
    Ok(response.text())
}

impl Assistant for GeminiAssistant {
    fn ask(&self, question: String, context: Option<String>) -> BoxFuture<'static, String> {
        let Some(api_key) = self.config.api_key.clone() else {
            return futures::future::ready(MISSING_KEY_REPLY.to_string()).boxed();
        };

        let agent = self.agent.clone();
        let url = self.url();
        let model = self.config.model.clone();
        let request = GenerateRequest::new(question, context.as_deref());

        spawn_reply("gemini-request", move || {
            log::info!("Asking {} ({} chars)", model, request.contents[0].parts[0].text.len());
            match generate(&agent, &url, &api_key, &request) {
                Ok(Some(text)) => {
                    log::info!("Reply received ({} chars)", text.len());
                    text
                }
                Ok(None) => {
                    log::warn!("{} returned no text", model);
                    EMPTY_REPLY.to_string()
                }
                Err(e) => {
                    log::error!("Gemini API error: {:#}", e);
                    UNAVAILABLE_REPLY.to_string()
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::time::Duration;

    #[test]
    fn test_request_wire_format() {
        let request = GenerateRequest::new("Who built you?".into(), Some("Crown"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Who built you?");
        let instruction = json["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
        assert!(instruction.ends_with("Current focus: Crown"));
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Liberty "},{"text":"Enlightening"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Liberty Enlightening"));
    }

    #[test]
    fn test_blank_response_has_no_text() {
        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);

        let blank: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap();
        assert_eq!(blank.text(), None);

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.text(), None);
    }

    #[test]
    fn test_missing_key_short_circuits() {
        let assistant = GeminiAssistant::new(AssistantConfig::default());
        let reply = block_on(assistant.ask("Hello".into(), None));
        assert_eq!(reply, MISSING_KEY_REPLY);
    }

    #[test]
    fn test_unreachable_endpoint_yields_apology() {
        let config = AssistantConfig {
            api_key: Some("test-key".into()),
            endpoint: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(2),
            ..AssistantConfig::default()
        };
        let assistant = GeminiAssistant::new(config);
        assert_eq!(assistant.url(), "http://127.0.0.1:9/models/gemini-2.5-flash:generateContent");

        let reply = block_on(assistant.ask("Hello".into(), None));
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }
}
