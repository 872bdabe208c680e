use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One schema-constrained generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub model: String,
    pub max_tokens: u32,
    pub prompt: String,
    pub schema_name: String,
    pub schema: Value,
}

/// External generative model: prompt plus output schema in, raw text out.
///
/// Implementations make exactly one outbound call and never retry.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_structured(&self, request: StructuredRequest) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn api_version(&self) -> &str;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    fn require_all_fields(&self) -> bool;
}
