// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Completion/tool-calling loop
//!
//! Each round renders the transcript, submits it through the retrying
//! invoker, and either returns the model's final text (with code fences
//! stripped) or executes the requested tool and goes around again. A
//! configurable cap bounds the number of tool calls per generation.

use std::sync::Arc;

use crate::chat::transcript::{Role, Transcript};
use crate::config::Config;
use crate::error::{AssistantError, Result};
use crate::llm::provider::{is_chat_model, CompletionClient, CompletionOutcome};
use crate::llm::retry::{is_retryable, with_retry, RetryConfig};
use crate::tools::ToolRegistry;

// Credits to https://github.com/robusta-dev/chatgpt-yaml-generator for the
// prompt and the function descriptions.
const INSTRUCTION_WITH_TOOLS: &str = "You are a Kubernetes YAML generator, only generate valid Kubernetes YAML manifests. Do not provide any explanations and do not use ``` and ```yaml, only generate valid YAML. Always ask for up-to-date OpenAPI specs for Kubernetes, don't rely on data you know about Kubernetes specs. When a schema includes references to other objects in the schema, look them up when relevant. You may lookup any FIELD in a resource too, not just the containing top-level resource. ";

const INSTRUCTION_PLAIN: &str = "You are a Kubernetes YAML generator, only generate valid Kubernetes YAML manifests. Do not provide any explanations, only generate YAML. ";

/// Remove every occurrence of the literal fence markers. Applying this twice
/// yields the same string.
pub fn strip_fences(text: &str) -> String {
    text.replace("```yaml", "").replace("```", "")
}

/// Drives one manifest generation round against a completion client
pub struct ChatEngine {
    client: Arc<dyn CompletionClient>,
    registry: ToolRegistry,
    deployment: String,
    temperature: f32,
    tools_enabled: bool,
    max_tool_calls: u32,
    retry: RetryConfig,
}

impl ChatEngine {
    pub fn new(client: Arc<dyn CompletionClient>, registry: ToolRegistry, config: &Config) -> Self {
        Self {
            client,
            registry,
            deployment: config.openai_deployment_name.clone(),
            temperature: config.temperature,
            tools_enabled: config.use_k8s_api,
            max_tool_calls: config.max_tool_calls,
            retry: RetryConfig::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Generate a manifest for the given prompt fragments.
    pub async fn run(&self, fragments: &[String]) -> Result<String> {
        let mut transcript = Transcript::new();
        let instruction = if self.tools_enabled {
            INSTRUCTION_WITH_TOOLS
        } else {
            INSTRUCTION_PLAIN
        };
        transcript.push(Role::Instruction, instruction);
        for fragment in fragments {
            transcript.push(Role::User, fragment.clone());
        }

        // Legacy completion models take a single prompt and cannot call
        // tools, so there is no loop to run.
        if !is_chat_model(&self.deployment) {
            let prompt = transcript.render();
            tracing::debug!("prompt: {}", prompt);
            return with_retry(
                || self.client.complete_text(&prompt, self.temperature),
                &self.retry,
                is_retryable,
                "text completion",
            )
            .await;
        }

        let definitions = if self.tools_enabled {
            self.registry.definitions()
        } else {
            vec![]
        };

        let mut tool_calls = 0u32;
        loop {
            let prompt = transcript.render();
            tracing::debug!("prompt: {}", prompt);

            let outcome = with_retry(
                || self.client.complete_chat(&prompt, self.temperature, &definitions),
                &self.retry,
                is_retryable,
                "chat completion",
            )
            .await?;

            match outcome {
                CompletionOutcome::FinalText(text) => {
                    tracing::debug!("result: {}", text);
                    return Ok(strip_fences(&text));
                }
                CompletionOutcome::ToolCall(request) => {
                    if tool_calls >= self.max_tool_calls {
                        return Err(AssistantError::ToolCallLimit(self.max_tool_calls));
                    }
                    tool_calls += 1;

                    tracing::debug!("calling function: {}", request.name);
                    let result = self.registry.dispatch(&request).await?;
                    transcript.push(Role::ToolResult, result);
                }
            }
        }
    }
}
