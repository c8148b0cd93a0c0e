use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{QueryInterpreter, StructuredQuery};
use crate::fields::{FILTER_FIELDS, filter_schema, sanitize_filter};

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const TOOL_NAME: &str = "generate_pinecone_query";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str = "You turn natural-language searches over a database of \
Y Combinator companies into vector search queries.

Return queryText: the semantic core of the request, with temporal or conditional words \
such as \"recently\", \"new\" or \"latest\" removed. Funding dates are not stored, so \
for \"recently funded fintech\" search for \"fintech startups\".

Add a filter only for constraints the user states explicitly. Use $eq for one value, \
$in for alternatives, $gte/$lte for numeric bounds. Separate fields are combined with AND.

Examples:
- \"AI companies from W24\" -> queryText \"AI companies\", filter {\"batch\": {\"$eq\": \"W24\"}}
- \"healthcare or fintech startups\" -> queryText \"healthcare fintech startups\", \
filter {\"industry\": {\"$in\": [\"Healthcare\", \"Fintech\"]}}
- \"early stage companies with 20+ employees that are hiring\" -> queryText \"early stage companies\", \
filter {\"stage\": {\"$eq\": \"Early\"}, \"team_size\": {\"$gte\": 20}, \"isHiring\": {\"$eq\": true}}

Only set topK when the user asks for a specific number of results.";

/// Chat-completions settings for the interpreter
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// - OPENAI_API_KEY: required
/// - OPENAI_BASE_URL: defaults to https://api.openai.com/v1
/// - OPENAI_CHAT_MODEL: defaults to gpt-4o-mini
impl FromEnv for LlmConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: env_or_default("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
    tools: [Value; 1],
    tool_choice: Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

fn tool_definition() -> Value {
    let fields: Vec<&str> = FILTER_FIELDS.iter().map(|f| f.name).collect();
    json!({
        "type": "function",
        "function": {
            "name": TOOL_NAME,
            "description": format!(
                "Build a vector search query: text to embed plus an optional metadata filter over {}",
                fields.join(", ")
            ),
            "parameters": {
                "type": "object",
                "properties": {
                    "queryText": {
                        "type": "string",
                        "description": "Cleaned query text to embed"
                    },
                    "filter": filter_schema(),
                    "topK": {
                        "type": "number",
                        "description": "Number of results, only when the user asks for one"
                    }
                },
                "required": ["queryText"]
            }
        }
    })
}

/// Read tool-call arguments, keeping only what the field table allows
fn parse_arguments(query: &str, arguments: &str) -> Result<StructuredQuery, String> {
    let args: Value =
        serde_json::from_str(arguments).map_err(|e| format!("invalid tool arguments: {}", e))?;

    let query_text = args
        .get("queryText")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(query)
        .to_string();

    let filter = args.get("filter").and_then(sanitize_filter);

    let top_k = args
        .get("topK")
        .and_then(Value::as_f64)
        .filter(|k| *k >= 1.0)
        .map(|k| k.min(u32::MAX as f64) as u32);

    Ok(StructuredQuery {
        query_text,
        filter,
        top_k,
    })
}

/// Interprets queries with one forced tool call to an OpenAI chat model
pub struct LlmQueryInterpreter {
    client: Client,
    config: LlmConfig,
    tool: Value,
}

impl LlmQueryInterpreter {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            tool: tool_definition(),
        }
    }

    async fn request(&self, query: &str) -> Result<StructuredQuery, String> {
        let request = ChatRequest {
            model: &self.config.model,
            temperature: TEMPERATURE,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            tools: [self.tool.clone()],
            tool_choice: json!({"type": "function", "function": {"name": TOOL_NAME}}),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("OpenAI API error ({}): {}", status, error_text));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid response: {}", e))?;

        let call = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.tool_calls.into_iter().next())
            .ok_or_else(|| "no tool call in response".to_string())?;

        if call.function.name != TOOL_NAME {
            return Err(format!("unexpected tool '{}'", call.function.name));
        }

        parse_arguments(query, &call.function.arguments)
    }
}

#[async_trait]
impl QueryInterpreter for LlmQueryInterpreter {
    async fn interpret(&self, query: &str) -> StructuredQuery {
        match self.request(query).await {
            Ok(structured) => {
                tracing::debug!(
                    query_text = %structured.query_text,
                    filtered = structured.filter.is_some(),
                    "Interpreted search query"
                );
                structured
            }
            Err(reason) => {
                tracing::warn!(%reason, "Query interpretation failed, searching raw text");
                StructuredQuery::raw(query)
            }
        }
    }
}
