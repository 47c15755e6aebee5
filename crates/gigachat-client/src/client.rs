//! GigaChat HTTP client
//!
//! OAuth token exchange, image upload and chat completion against the
//! GigaChat API. Tokens are cached until shortly before expiry.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;
use worksheet_core::{grid_height_mm, sanitize, Difficulty, SourceImage};

use crate::error::ProviderError;
use crate::prompts;

/// Models that accept image attachments. Extraction with anything else is a
/// precondition violation rejected before any network call.
pub const MULTIMODAL_MODELS: &[&str] = &["GigaChat-Max"];

/// Whether a model id supports image input.
pub fn supports_images(model: &str) -> bool {
    MULTIMODAL_MODELS.contains(&model)
}

/// Refresh the cached token this long before its reported expiry.
const TOKEN_SLACK: Duration = Duration::from_secs(60);

/// Per-request limit; provider inference runs tens of seconds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Provider access configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base64 authorization key for the OAuth exchange.
    pub credentials: String,
    /// API scope, e.g. `GIGACHAT_API_PERS`.
    pub scope: String,
    pub oauth_url: String,
    pub api_base_url: String,
}

impl ProviderConfig {
    pub fn new(credentials: String, scope: String) -> Self {
        Self {
            credentials,
            scope,
            oauth_url: "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".to_string(),
            api_base_url: "https://gigachat.devices.sberbank.ru/api/v1".to_string(),
        }
    }
}

struct CachedToken {
    access_token: String,
    /// Unix epoch milliseconds.
    expires_at: i64,
}

pub struct GigaChatClient {
    config: ProviderConfig,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl GigaChatClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            // The Sber API chain is signed by the Russian Trusted Root CA,
            // absent from standard trust stores.
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            config,
            http,
            token: Mutex::new(None),
        })
    }

    /// Extract worksheet body markup from photographed pages.
    pub async fn extract(
        &self,
        images: &[SourceImage],
        task_count: u32,
        model: &str,
    ) -> Result<String, ProviderError> {
        if !supports_images(model) {
            return Err(ProviderError::UnsupportedModel {
                model: model.to_string(),
            });
        }
        if self.config.credentials.is_empty() {
            return Err(ProviderError::MissingCredentials);
        }

        let token = self.access_token().await?;

        let mut attachments = Vec::with_capacity(images.len());
        for image in images {
            attachments.push(self.upload_file(&token, image).await?);
        }

        let prompt = prompts::extraction(task_count, grid_height_mm(task_count));
        let content = self.chat(&token, model, &prompt, attachments).await?;
        Ok(sanitize(&content))
    }

    /// Regenerate a worksheet body as "variant 2" with new numbers.
    pub async fn regenerate(
        &self,
        original: &str,
        task_count: u32,
        model: &str,
        difficulty: Difficulty,
    ) -> Result<String, ProviderError> {
        if self.config.credentials.is_empty() {
            return Err(ProviderError::MissingCredentials);
        }

        let token = self.access_token().await?;
        let prompt =
            prompts::regeneration(original, task_count, grid_height_mm(task_count), difficulty);
        let content = self.chat(&token, model, &prompt, Vec::new()).await?;
        Ok(sanitize(&content))
    }

    /// Get a valid access token, reusing the cached one when fresh.
    async fn access_token(&self) -> Result<String, ProviderError> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            let now_ms = chrono_now_ms();
            if cached.expires_at - (TOKEN_SLACK.as_millis() as i64) > now_ms {
                return Ok(cached.access_token.clone());
            }
        }

        debug!("requesting new GigaChat access token");
        let response = self
            .http
            .post(&self.config.oauth_url)
            .header("Authorization", format!("Basic {}", self.config.credentials))
            .header("RqUID", Uuid::new_v4().to_string())
            .form(&[("scope", self.config.scope.as_str())])
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let token: TokenResponse = read_json(response).await?;
        let access_token = token.access_token.clone();
        *guard = Some(CachedToken {
            access_token: token.access_token,
            expires_at: token.expires_at,
        });
        Ok(access_token)
    }

    /// Upload one image; returns the attachment id for the chat request.
    async fn upload_file(
        &self,
        token: &str,
        image: &SourceImage,
    ) -> Result<String, ProviderError> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type())
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("purpose", "general");

        let response = self
            .http
            .post(format!("{}/files", self.config.api_base_url))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let uploaded: UploadResponse = read_json(response).await?;
        Ok(uploaded.id)
    }

    /// One chat completion; returns the raw assistant message content.
    async fn chat(
        &self,
        token: &str,
        model: &str,
        prompt: &str,
        attachments: Vec<String>,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
                attachments,
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.api_base_url))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let completion: ChatResponse = read_json(response).await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(content)
    }
}

fn chrono_now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Deserialize a successful response body, mapping non-2xx statuses to
/// `Rejected` with a truncated body for diagnostics.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail: String = body.chars().take(200).collect();
        return Err(ProviderError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Unavailable(format!("malformed provider response: {e}")))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Unix epoch milliseconds.
    expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(credentials: &str) -> GigaChatClient {
        GigaChatClient::new(ProviderConfig::new(
            credentials.to_string(),
            "GIGACHAT_API_PERS".to_string(),
        ))
        .unwrap()
    }

    #[test]
    fn multimodal_model_allowlist() {
        assert!(supports_images("GigaChat-Max"));
        assert!(!supports_images("GigaChat"));
        assert!(!supports_images("GigaChat-Pro"));
        assert!(!supports_images(""));
    }

    #[tokio::test]
    async fn extract_rejects_text_only_model_before_any_network_call() {
        let client = client("some-key");
        let images = vec![SourceImage::new("page.jpg", vec![0xff, 0xd8])];
        let err = client.extract(&images, 3, "GigaChat").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedModel { model } if model == "GigaChat"));
    }

    #[tokio::test]
    async fn extract_requires_credentials() {
        let client = client("");
        let images = vec![SourceImage::new("page.jpg", vec![])];
        let err = client
            .extract(&images, 3, "GigaChat-Max")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials));
    }

    #[tokio::test]
    async fn regenerate_requires_credentials() {
        let client = client("");
        let err = client
            .regenerate("\\TaskBox{1}{x}", 3, "GigaChat", Difficulty::Same)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials));
    }

    #[test]
    fn chat_response_parses() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"```latex\nBODY\n```"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "```latex\nBODY\n```");
    }

    #[test]
    fn attachments_omitted_when_empty() {
        let request = ChatRequest {
            model: "GigaChat-Max".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "x".to_string(),
                attachments: vec![],
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("attachments"));
    }
}
