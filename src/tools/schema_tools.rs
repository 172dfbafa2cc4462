// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Kubernetes schema lookup tools
//!
//! Two tools backed by the cluster's OpenAPI document: one resolves a plain
//! resource name to its fully-namespaced candidates, the other returns the
//! schema for an exact resource type.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::k8s::schema::{find_resource_names, schema_for_resource, SchemaSource};
use crate::llm::provider::ToolDefinition;
use crate::tools::{SchemaBuilder, Tool};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindSchemaNamesArgs {
    resource_name: String,
}

/// Resolves a resource or field name to its fully-namespaced candidates
pub struct FindSchemaNames {
    source: Arc<dyn SchemaSource>,
}

impl FindSchemaNames {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for FindSchemaNames {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "findSchemaNames".to_string(),
            description: "Get the list of possible fully-namespaced names for a specific \
                          Kubernetes resource. E.g. given `Container` return \
                          `io.k8s.api.core.v1.Container`. Given `EnvVarSource` return \
                          `io.k8s.api.core.v1.EnvVarSource`"
                .to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "resourceName",
                    "The name of a Kubernetes resource or field.",
                    true,
                )
                .build(),
        }
    }

    async fn run(&self, arguments: &str) -> Result<String> {
        let args: FindSchemaNamesArgs = serde_json::from_str(arguments)?;
        let names = find_resource_names(self.source.as_ref(), &args.resource_name).await?;
        Ok(names.join("\n"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetSchemaArgs {
    resource_type: String,
}

/// Returns the OpenAPI schema for an exact fully-namespaced resource type
pub struct GetSchema {
    source: Arc<dyn SchemaSource>,
}

impl GetSchema {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for GetSchema {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "getSchema".to_string(),
            description: "Get the OpenAPI schema for a Kubernetes resource".to_string(),
            input_schema: SchemaBuilder::new()
                .string(
                    "resourceType",
                    "The type of the Kubernetes resource or object (e.g. subresource). \
                     Must be fully namespaced, as returned by findSchemaNames",
                    true,
                )
                .build(),
        }
    }

    async fn run(&self, arguments: &str) -> Result<String> {
        let args: GetSchemaArgs = serde_json::from_str(arguments)?;
        let schema = schema_for_resource(self.source.as_ref(), &args.resource_type).await?;
        Ok(serde_json::to_string(&schema)?)
    }
}
