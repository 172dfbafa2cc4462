// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Resolved configuration for kubectl-assistant
//!
//! An explicit immutable value constructed once from the CLI arguments and
//! passed by reference into the client and tool constructors. Nothing in the
//! core reads ambient process state.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{AssistantError, Result};

/// Resolved, validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint for the OpenAI service (or Azure resource / local server)
    pub openai_endpoint: String,

    /// API key for the OpenAI service
    pub openai_api_key: String,

    /// Deployment/model name targeted by completion calls
    pub openai_deployment_name: String,

    /// Mapping from OpenAI model name to Azure deployment name
    pub azure_model_map: HashMap<String, String>,

    /// Sampling temperature, within [0, 2]
    pub temperature: f32,

    /// Whether the model may call the Kubernetes schema tools
    pub use_k8s_api: bool,

    /// Optional URL of a Kubernetes OpenAPI spec; when unset the schema is
    /// fetched from the cluster via kubectl
    pub k8s_openapi_url: Option<String>,

    /// Whether to ask before applying the generated manifest
    pub require_confirmation: bool,

    /// Print raw output immediately and exit
    pub raw: bool,

    /// Explicit kubeconfig path, if any
    pub kubeconfig: Option<PathBuf>,

    /// Namespace to apply into, if any
    pub namespace: Option<String>,

    /// Cap on schema tool calls per generation round
    pub max_tool_calls: u32,
}

impl Config {
    /// Validate the parsed CLI arguments and build the configuration.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let openai_api_key = cli
            .openai_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AssistantError::Config(
                    "no OpenAI key provided; set --openai-api-key or OPENAI_API_KEY".to_string(),
                )
            })?;

        if !(0.0..=2.0).contains(&cli.temperature) {
            return Err(AssistantError::Config(format!(
                "temperature must be between 0 and 2, got {}",
                cli.temperature
            )));
        }

        if cli.max_tool_calls == 0 {
            return Err(AssistantError::Config(
                "max-tool-calls must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            openai_endpoint: cli.openai_endpoint.clone(),
            openai_api_key,
            openai_deployment_name: cli.openai_deployment_name.clone(),
            azure_model_map: cli.azure_openai_map.iter().cloned().collect(),
            temperature: cli.temperature,
            use_k8s_api: cli.use_k8s_api,
            k8s_openapi_url: cli.k8s_openapi_url.clone(),
            require_confirmation: cli.require_confirmation,
            raw: cli.raw,
            kubeconfig: cli.kubeconfig.clone(),
            namespace: cli.namespace.clone(),
            max_tool_calls: cli.max_tool_calls,
        })
    }
}
