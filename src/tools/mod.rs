// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool system for kubectl-assistant
//!
//! Provides the framework for tools that the model can call while generating
//! a manifest, and the registry that dispatches a requested call to the
//! matching implementation.

pub mod schema_tools;

pub use schema_tools::*;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AssistantError, Result};
use crate::llm::provider::{ToolCallRequest, ToolDefinition, ToolInputSchema};

/// A tool the model may invoke during generation. Arguments arrive as the
/// raw JSON string produced by the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The definition advertised to the model
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool and return its textual result
    async fn run(&self, arguments: &str) -> Result<String>;
}

/// Registry of the tools available to one generation round
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: vec![] }
    }

    /// Register a tool. Registration order fixes the order definitions are
    /// advertised in.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions for every registered tool, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Execute the requested call. A name that matches no registered tool is
    /// an error; the model asked for something we never advertised.
    pub async fn dispatch(&self, request: &ToolCallRequest) -> Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.definition().name == request.name)
            .ok_or_else(|| {
                AssistantError::ToolExecution(format!("unknown tool: {}", request.name))
            })?;

        tool.run(&request.arguments).await
    }
}

/// Helper to create a tool input schema
pub struct SchemaBuilder {
    properties: serde_json::Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            properties: serde_json::Map::new(),
            required: vec![],
        }
    }

    /// Add a string property
    pub fn string(mut self, name: &str, description: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "string",
                "description": description
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Build the schema
    pub fn build(self) -> ToolInputSchema {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: Value::Object(self.properties),
            required: self.required,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: "echo".to_string(),
                description: "Echo the arguments back".to_string(),
                input_schema: SchemaBuilder::new()
                    .string("text", "Text to echo", true)
                    .build(),
            }
        }

        async fn run(&self, arguments: &str) -> Result<String> {
            Ok(arguments.to_string())
        }
    }

    #[test]
    fn test_schema_builder_string_required() {
        let schema = SchemaBuilder::new()
            .string("resourceName", "The resource name", true)
            .build();

        assert_eq!(schema.schema_type, "object");
        assert_eq!(schema.required, vec!["resourceName"]);
        assert_eq!(schema.properties["resourceName"]["type"], "string");
        assert_eq!(
            schema.properties["resourceName"]["description"],
            "The resource name"
        );
    }

    #[test]
    fn test_schema_builder_string_optional() {
        let schema = SchemaBuilder::new()
            .string("hint", "An optional hint", false)
            .build();

        assert!(schema.required.is_empty());
        assert_eq!(schema.properties["hint"]["type"], "string");
    }

    #[test]
    fn test_schema_builder_empty_build() {
        let schema = SchemaBuilder::new().build();

        assert_eq!(schema.schema_type, "object");
        assert!(schema.required.is_empty());
        if let Value::Object(props) = &schema.properties {
            assert!(props.is_empty());
        } else {
            panic!("Expected object properties");
        }
    }

    #[test]
    fn test_registry_definitions_in_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "echo");
    }

    #[tokio::test]
    async fn test_registry_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry
            .dispatch(&ToolCallRequest {
                name: "echo".to_string(),
                arguments: "{\"text\":\"hi\"}".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result, "{\"text\":\"hi\"}");
    }

    #[tokio::test]
    async fn test_registry_dispatch_unknown_tool() {
        let registry = ToolRegistry::new();

        let err = registry
            .dispatch(&ToolCallRequest {
                name: "missing".to_string(),
                arguments: "{}".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown tool: missing"));
    }

    #[test]
    fn test_registry_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.definitions().is_empty());
    }
}
