//! OpenRouter chat-completion client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use tracing::debug;

use kosei_core::config::LlmConfig;
use kosei_core::ConversionRequest;

use crate::error::LlmError;
use crate::prompt;
use crate::transport::{HttpExchange, HttpRequest, ReqwestExchange};
use crate::types::{ChatEnvelope, ChatMessage, ChatRequestBody};

/// Anything that can turn a [`ConversionRequest`] into a raw model response.
#[async_trait]
pub trait CorrectionBackend: Send + Sync {
    /// Run one correction round trip and return the raw response content.
    async fn correct(&self, request: &ConversionRequest) -> Result<String, LlmError>;
}

/// Client for an OpenRouter-compatible chat-completion endpoint.
///
/// The API key is read from the configured environment variable on every
/// call rather than cached, so a key rotated mid-session takes effect on the
/// next request.
pub struct OpenRouterClient<T: HttpExchange> {
    config: LlmConfig,
    transport: T,
}

impl OpenRouterClient<ReqwestExchange> {
    /// Build a client with the production HTTP transport.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let transport = ReqwestExchange::new(config.timeout_secs)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpExchange> OpenRouterClient<T> {
    pub fn with_transport(config: LlmConfig, transport: T) -> Self {
        Self { config, transport }
    }

    fn read_credential(&self) -> Result<Secret<String>, LlmError> {
        match std::env::var(&self.config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Secret::new(key)),
            _ => Err(LlmError::MissingCredential(self.config.api_key_env.clone())),
        }
    }

    fn build_body(&self, request: &ConversionRequest) -> Result<String, LlmError> {
        let body = ChatRequestBody {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::build_system_instruction(request),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::build_user_payload(request),
                },
            ],
            temperature: self.config.temperature,
        };
        serde_json::to_string(&body).map_err(|e| LlmError::Encode(e.to_string()))
    }

    fn build_headers(&self, api_key: &Secret<String>) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", api_key.expose_secret()),
            ),
            ("HTTP-Referer".to_string(), self.config.referer.clone()),
            ("X-Title".to_string(), self.config.title.clone()),
        ]
    }
}

#[async_trait]
impl<T: HttpExchange> CorrectionBackend for OpenRouterClient<T> {
    async fn correct(&self, request: &ConversionRequest) -> Result<String, LlmError> {
        let api_key = self.read_credential()?;
        let body = self.build_body(request)?;
        debug!(
            model = %self.config.model,
            input_chars = request.input_text().chars().count(),
            "Sending correction request"
        );

        let (status, raw) = self
            .transport
            .post(HttpRequest {
                endpoint: self.config.endpoint.clone(),
                headers: self.build_headers(&api_key),
                body,
            })
            .await?;

        if !(200..300).contains(&status) {
            return Err(LlmError::Http { status });
        }
        first_choice_content(&raw)
    }
}

/// Pull the first choice's message content out of a response envelope.
pub fn first_choice_content(raw: &str) -> Result<String, LlmError> {
    let envelope: ChatEnvelope =
        serde_json::from_str(raw).map_err(|e| LlmError::Envelope(e.to_string()))?;
    envelope
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(LlmError::EmptyChoices)
}
