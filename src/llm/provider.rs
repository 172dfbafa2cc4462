// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Completion client trait and related types
//!
//! Defines the abstraction the conversation engine talks to. The production
//! implementation lives in [`crate::llm::openai`]; tests substitute scripted
//! mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Legacy models that only speak the plain-completion API. These never see
/// tool definitions and run the conversation loop exactly once.
pub const NON_CHAT_MODELS: &[&str] = &["code-davinci-002", "text-davinci-003"];

/// Whether a deployment name routes through the chat-completion call shape.
pub fn is_chat_model(deployment: &str) -> bool {
    !NON_CHAT_MODELS.contains(&deployment)
}

/// A single request/response exchange with the completion provider.
///
/// No retry logic lives behind this trait; that is the job of
/// [`crate::llm::retry::with_retry`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Plain completion for non-chat models. Returns the generated text.
    async fn complete_text(&self, prompt: &str, temperature: f32) -> Result<String>;

    /// Chat completion. The transcript is sent as a single user-role message;
    /// when `tools` is non-empty the definitions are offered with
    /// tool-choice `auto`, otherwise tools are omitted entirely and the
    /// provider must answer directly.
    async fn complete_chat(
        &self,
        transcript: &str,
        temperature: f32,
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome>;
}

/// Outcome of one chat-completion exchange. Exactly one variant holds per
/// provider response; when the provider emits several simultaneous tool
/// calls, only the first is honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The model answered with plain content; the conversation is done.
    FinalText(String),

    /// The model asked for a tool to be executed before it continues.
    ToolCall(ToolCallRequest),
}

/// A tool invocation requested by the provider. Immutable once received;
/// the arguments are validated by typed deserialization at dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRequest {
    /// Declared tool name, e.g. `findSchemaNames`.
    pub name: String,

    /// Arguments as a JSON object string matching the tool's parameter schema.
    pub arguments: String,
}

/// Tool definition offered to the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Tool description
    pub description: String,

    /// Input schema (JSON Schema)
    pub input_schema: ToolInputSchema,
}

/// Input schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Schema type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Property definitions
    pub properties: serde_json::Value,

    /// Required properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}
