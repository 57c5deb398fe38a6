//! HTTP client for the Google Cloud Text-to-Speech `text:synthesize` endpoint.

use super::types::{RemoteErrorBody, SynthesisRequest, SynthesisResponse};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use base64::Engine as _;

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";
pub const DEFAULT_ENDPOINT_PATH: &str = "/v1/text:synthesize";
pub const API_KEY_ENV: &str = "GOOGLE_TTS_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Message used when a failed response carries no readable error message.
pub const UNKNOWN_API_ERROR: &str = "Unknown API error occurred.";

/// Anything that can turn a request into base64 audio.
///
/// [`TtsClient`] is the production implementation; tests substitute fakes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns the base64 `audioContent` of a successful synthesis.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String>;
}

/// Client for text-to-speech synthesis.
pub struct TtsClient {
    http_client: reqwest::Client,
    base_url: String,
    endpoint_path: String,
    api_key: String,
}

impl TtsClient {
    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path)
    }
}

#[async_trait]
impl SpeechSynthesizer for TtsClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String> {
        let endpoint = self.endpoint();
        tracing::debug!(
            endpoint = %endpoint,
            language = %request.voice.language_code,
            voice = %request.voice.name,
            bytes = request.input.text.len(),
            "sending synthesis request"
        );
        let response = self
            .http_client
            .post(&endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("TTS request failed: {}", e),
                    ErrorContext::new().with_source("tts"),
                )
            })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            Error::network_with_context(
                format!("Failed to read TTS response: {}", e),
                ErrorContext::new().with_source("tts"),
            )
        })?;

        if status != reqwest::StatusCode::OK {
            let message = serde_json::from_slice::<RemoteErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
            tracing::warn!(status = status.as_u16(), %message, "synthesis rejected");
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SynthesisResponse =
            serde_json::from_slice(&bytes).map_err(|e| Error::InvalidResponse {
                message: format!("malformed JSON body: {}", e),
            })?;
        match parsed.audio_content {
            Some(content) if !content.is_empty() => Ok(content),
            _ => Err(Error::InvalidResponse {
                message: "response has no audioContent".to_string(),
            }),
        }
    }
}

/// Decodes the service's base64 `audioContent`.
pub fn decode_audio_content(encoded: &str) -> Result<Vec<u8>> {
    Ok(base64::engine::general_purpose::STANDARD.decode(encoded.trim())?)
}

pub struct TtsClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout_secs: u64,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            endpoint_path: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Falls back to `GOOGLE_TTS_API_KEY` when no key was given.
    pub fn build(self) -> Result<TtsClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()))
            .ok_or(Error::MissingApiKey)?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new().with_field_path("base_url"),
            )
        })?;
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| DEFAULT_ENDPOINT_PATH.to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(TtsClient {
            http_client,
            base_url,
            endpoint_path,
            api_key,
        })
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
