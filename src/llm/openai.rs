// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! OpenAI-compatible completion client
//!
//! Implements the CompletionClient trait against api.openai.com, Azure
//! OpenAI deployments, and local OpenAI-compatible endpoints. Azure is
//! detected from the endpoint host; its requests use the `api-key` header,
//! a deployment-scoped URL, and the function-calling API version.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::Config;
use crate::error::{ApiError, AssistantError, Result};
use crate::llm::provider::{CompletionClient, CompletionOutcome, ToolCallRequest, ToolDefinition};

/// API version required by Azure OpenAI for function calls
const AZURE_API_VERSION: &str = "2023-07-01-preview";

/// OpenAI/Azure completion client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    deployment: String,
    azure: bool,
    model_map: HashMap<String, String>,
}

impl OpenAiClient {
    /// Create a client from the resolved configuration.
    pub fn new(config: &Config) -> Self {
        let base_url = config.openai_endpoint.trim_end_matches('/').to_string();
        let azure = base_url.contains("openai.azure.com");

        Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url,
            deployment: config.openai_deployment_name.clone(),
            azure,
            model_map: config.azure_model_map.clone(),
        }
    }

    /// The deployment segment used in Azure URLs, passed through the
    /// model-name remapping table when one is configured.
    fn azure_deployment(&self) -> &str {
        self.model_map
            .get(&self.deployment)
            .map(String::as_str)
            .unwrap_or(&self.deployment)
    }

    fn endpoint_url(&self, operation: &str) -> String {
        if self.azure {
            format!(
                "{}/openai/deployments/{}/{}?api-version={}",
                self.base_url,
                self.azure_deployment(),
                operation,
                AZURE_API_VERSION
            )
        } else {
            format!("{}/{}", self.base_url, operation)
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.azure {
            request.header("api-key", &self.api_key)
        } else {
            request.header("Authorization", format!("Bearer {}", &self.api_key))
        }
    }

    /// Convert tool definitions to the OpenAI function-calling format
    fn convert_tools(tools: &[ToolDefinition]) -> Vec<WireTool> {
        tools
            .iter()
            .map(|t| WireTool {
                r#type: "function".to_string(),
                function: WireFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: serde_json::json!({
                        "type": t.input_schema.schema_type,
                        "properties": t.input_schema.properties,
                        "required": t.input_schema.required,
                    }),
                },
            })
            .collect()
    }

    /// Map a non-2xx response into the provider error taxonomy. Status 429
    /// is the sole retry trigger recognized by the retry policy.
    fn parse_error(status: u16, retry_after: Option<u32>, body: &str) -> AssistantError {
        match status {
            429 => AssistantError::Api(ApiError::RateLimited(retry_after.unwrap_or(60))),
            401 | 403 => AssistantError::Api(ApiError::AuthenticationFailed),
            _ => {
                let message = serde_json::from_str::<WireError>(body)
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| body.to_string());
                AssistantError::Api(ApiError::ServerError { status, message })
            }
        }
    }

    async fn send<B, R>(&self, operation: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: serde::de::DeserializeOwned,
    {
        let response = self
            .authorized(self.client.post(self.endpoint_url(operation)))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status, retry_after, &body));
        }

        Ok(response.json().await?)
    }

    /// Enforce the exactly-one-candidate contract shared by both call shapes.
    fn single_choice<C>(choices: Vec<C>) -> Result<C> {
        let count = choices.len();
        let mut choices = choices;
        match (choices.pop(), count) {
            (Some(choice), 1) => Ok(choice),
            _ => Err(AssistantError::Api(ApiError::InvalidResponse(format!(
                "expected choices to be 1 but received: {}",
                count
            )))),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete_text(&self, prompt: &str, temperature: f32) -> Result<String> {
        let body = TextRequest {
            model: self.deployment.clone(),
            prompt: vec![prompt.to_string()],
            echo: false,
            n: 1,
            temperature,
        };

        let response: TextResponse = self.send("completions", &body).await?;
        let choice = Self::single_choice(response.choices)?;
        Ok(choice.text)
    }

    async fn complete_chat(
        &self,
        transcript: &str,
        temperature: f32,
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome> {
        let body = ChatRequest {
            model: self.deployment.clone(),
            messages: vec![WireMessage {
                role: "user".to_string(),
                content: transcript.to_string(),
            }],
            n: 1,
            temperature,
            tools: if tools.is_empty() {
                None
            } else {
                Some(Self::convert_tools(tools))
            },
            tool_choice: if tools.is_empty() { None } else { Some("auto") },
        };

        let response: ChatResponse = self.send("chat/completions", &body).await?;
        let choice = Self::single_choice(response.choices)?;

        // Only the first tool call is honored; simultaneous calls are not modeled.
        if let Some(call) = choice
            .message
            .tool_calls
            .into_iter()
            .flatten()
            .next()
        {
            return Ok(CompletionOutcome::ToolCall(ToolCallRequest {
                name: call.function.name,
                arguments: call.function.arguments,
            }));
        }

        Ok(CompletionOutcome::FinalText(
            choice.message.content.unwrap_or_default(),
        ))
    }
}

// Wire types (OpenAI-compatible format)

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    n: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    r#type: String,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct TextRequest {
    model: String,
    prompt: Vec<String>,
    echo: bool,
    n: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct TextResponse {
    choices: Vec<TextChoice>,
}

#[derive(Debug, Deserialize)]
struct TextChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    message: String,
}
