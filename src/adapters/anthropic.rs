use crate::domain::ports::{ConfigProvider, ModelClient, StructuredRequest};
use crate::utils::error::{PlanError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    /// Any block kind this client does not consume (tool use, thinking, ...).
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

impl From<StructuredRequest> for MessageRequest {
    fn from(request: StructuredRequest) -> Self {
        Self {
            model: request.model,
            max_tokens: request.max_tokens,
            messages: vec![Message {
                role: Role::User,
                content: vec![ContentBlock::Text {
                    text: request.prompt,
                }],
            }],
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: request.schema_name,
                    strict: true,
                    schema: request.schema,
                },
            },
        }
    }
}

impl MessageResponse {
    /// Text of the first content block; the plan is expected there.
    pub fn first_text(&self) -> Result<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(ContentBlock::Other) => Err(PlanError::model_response(
                "first content block is not a text block",
            )),
            None => Err(PlanError::model_response("response contained no content blocks")),
        }
    }
}

/// Messages API client. Uses the transport's default timeout and never retries.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    api_key: String,
    base_url: String,
    api_version: String,
    client: Client,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(PlanError::MissingConfigError {
                field: "model.api_key".to_string(),
            });
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client: Client::new(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.api_key())?
            .with_base_url(config.api_base_url())
            .with_api_version(config.api_version()))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).map_err(|_| PlanError::InvalidConfigValueError {
                field: "model.api_key".to_string(),
                value: "<redacted>".to_string(),
                reason: "API key contains characters not allowed in a header".to_string(),
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&self.api_version).map_err(|_| {
                PlanError::InvalidConfigValueError {
                    field: "model.api_version".to_string(),
                    value: self.api_version.clone(),
                    reason: "Not a valid header value".to_string(),
                }
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub async fn create_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let url = format!("{}/v1/messages", self.base_url);
        tracing::debug!("Making model request to: {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model API response status: {}", status);

        if status.is_success() {
            let body = response.text().await?;
            let message: MessageResponse = serde_json::from_str(&body).map_err(|e| {
                PlanError::model_response(format!("Failed to decode API response: {}", e))
            })?;
            return Ok(message);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = match serde_json::from_str::<ErrorEnvelope>(&error_text) {
            Ok(envelope) => format!("{}: {}", envelope.error.error_type, envelope.error.message),
            Err(_) => error_text,
        };

        Err(PlanError::ModelApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn generate_structured(&self, request: StructuredRequest) -> Result<String> {
        let request = MessageRequest::from(request);
        let response = self.create_message(&request).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "Model {} used {} input / {} output tokens",
                response.model,
                usage.input_tokens,
                usage.output_tokens
            );
        }
        if response.stop_reason.as_deref() == Some("max_tokens") {
            tracing::warn!(
                "Model output for {} hit the {} token limit; the plan is likely truncated",
                response.id,
                request.max_tokens
            );
        }

        response.first_text().map(str::to_string)
    }
}
