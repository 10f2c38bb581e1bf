use crate::error::ExtractError;
use crate::models::PriceListExtraction;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that extracts product \
information from text. Prices are in Indonesian Rupiah (IDR). Final price most of the \
times mentioned as HNA+PPN. Ensure to process the entire text and provide a complete \
list of products.";

/// Structured-extraction service seam: one chunk in, typed price-list records
/// out. Implementations may fail per call; the pipeline isolates those
/// failures so sibling chunks still contribute.
#[async_trait]
pub trait PriceListExtractor {
    async fn extract(&self, chunk: &str) -> Result<Vec<PriceListExtraction>, ExtractError>;
}

/// Extraction via the OpenAI chat completions API with a strict `json_schema`
/// response format, so the reply deserializes directly into
/// [`PriceListExtraction`] without manual text parsing.
pub struct OpenAiExtractor {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiExtractor {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Reads the credential from `OPENAI_API_KEY`.
    pub fn from_env(
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ExtractError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ExtractError::MissingCredential("OPENAI_API_KEY".to_string()))?;
        Ok(Self::new(base_url, model, api_key))
    }
}

#[async_trait]
impl PriceListExtractor for OpenAiExtractor {
    async fn extract(&self, chunk: &str) -> Result<Vec<PriceListExtraction>, ExtractError> {
        let body = json!({
            "model": self.model,
            "temperature": 0.0,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_INSTRUCTION,
                },
                {
                    "role": "user",
                    "content": format!(
                        "Extract product information from the following text: {chunk}"
                    ),
                },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "price_list_extraction",
                    "strict": true,
                    "schema": response_schema(),
                },
            },
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().to_string();
            let details = response.text().await.unwrap_or_default();
            return Err(ExtractError::Service { status, details });
        }

        let reply: ChatReply = response.json().await?;
        Ok(vec![parse_reply(reply)?])
    }
}

/// The schema the service is asked to conform to. OpenAI strict mode requires
/// `additionalProperties: false` and every property listed as required.
fn response_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["distributor_name", "products"],
        "properties": {
            "distributor_name": {"type": "string"},
            "products": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["product_name", "final_price"],
                    "properties": {
                        "product_name": {"type": "string"},
                        "final_price": {"type": "number"},
                    },
                },
            },
        },
    })
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

fn parse_reply(reply: ChatReply) -> Result<PriceListExtraction, ExtractError> {
    let choice = reply
        .choices
        .into_iter()
        .next()
        .ok_or(ExtractError::EmptyReply)?;

    Ok(serde_json::from_str(&choice.message.content)?)
}
