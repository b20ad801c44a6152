use crate::model_trait::LanguageModel;
use crate::ndjson::{response_fragment, LineAssembler};
use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Serialize;
use voxchat_core::{LlmConfig, LlmError};

/// Spoken in place of a reply when the backend cannot be reached.
pub const UNREACHABLE_REPLY: &str = "Sorry, I couldn't reach the AI model.";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Client for a local Ollama-style generation endpoint.
///
/// The response body is newline-delimited JSON delivered as the
/// backend produces tokens; fragments are appended as each line
/// completes rather than after the body ends.
pub struct OllamaClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    system_prompt: Option<String>,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_prompt(&self, utterance: &str) -> String {
        match &self.system_prompt {
            Some(system) => format!("{}\n\n{}", system, utterance),
            None => utterance.to_string(),
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, utterance: &str) -> Result<String, LlmError> {
        let prompt = self.build_prompt(utterance);
        let body = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Unreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| LlmError::Unreachable(e.to_string()))?;

        let mut stream = response.bytes_stream();
        let mut assembler = LineAssembler::new();
        let mut reply = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| LlmError::Unreachable(e.to_string()))?;
            for line in assembler.push(&bytes) {
                if let Some(fragment) = response_fragment(&line) {
                    reply.push_str(&fragment);
                }
            }
        }
        if let Some(line) = assembler.finish() {
            if let Some(fragment) = response_fragment(&line) {
                reply.push_str(&fragment);
            }
        }

        Ok(reply.trim().to_string())
    }
}
