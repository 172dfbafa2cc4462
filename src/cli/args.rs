// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Every flag has an environment-variable fallback so the assistant can be
//! driven from CI or shell profiles without repeating flags.

use clap::Parser;
use std::path::PathBuf;

/// Default endpoint for the OpenAI API
pub const OPENAI_API_URL_V1: &str = "https://api.openai.com/v1";

/// kubectl-assistant - generate Kubernetes manifests from natural language
#[derive(Parser, Debug)]
#[command(name = "kubectl-assistant")]
#[command(version, about = "Generate and apply Kubernetes manifests from natural language")]
pub struct Cli {
    /// The request describing the manifest to generate
    #[arg(required = true, trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// The API key for the OpenAI service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// The endpoint for the OpenAI service. Set this to a Local AI endpoint
    /// or an Azure OpenAI Service resource, if needed
    #[arg(long, env = "OPENAI_ENDPOINT", default_value = OPENAI_API_URL_V1)]
    pub openai_endpoint: String,

    /// The deployment name used for the model in the OpenAI service
    #[arg(long, env = "OPENAI_DEPLOYMENT_NAME", default_value = "gpt-3.5-turbo-0301")]
    pub openai_deployment_name: String,

    /// Mapping from OpenAI model to Azure OpenAI deployment,
    /// e.g. gpt-3.5-turbo=my-deployment
    #[arg(
        long,
        env = "AZURE_OPENAI_MAP",
        value_delimiter = ',',
        value_parser = parse_model_mapping
    )]
    pub azure_openai_map: Vec<(String, String)>,

    /// Whether to ask for confirmation before applying the manifest
    #[arg(
        long,
        env = "REQUIRE_CONFIRMATION",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_name = "BOOL"
    )]
    pub require_confirmation: bool,

    /// The sampling temperature for the model, between 0 and 2. Closer to 0
    /// is more deterministic but less creative
    #[arg(long, env = "TEMPERATURE", default_value_t = 0.0)]
    pub temperature: f32,

    /// Print the raw YAML output immediately, without confirmation
    #[arg(long)]
    pub raw: bool,

    /// Let the model call into the Kubernetes OpenAPI schema while generating
    #[arg(long, env = "USE_K8S_API")]
    pub use_k8s_api: bool,

    /// URL of a Kubernetes OpenAPI spec. Only used with --use-k8s-api;
    /// when unset the schema is fetched from the cluster via kubectl
    #[arg(long, env = "K8S_OPENAPI_URL")]
    pub k8s_openapi_url: Option<String>,

    /// Path to the kubeconfig file (defaults to ~/.kube/config)
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Namespace to apply the manifest into
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Maximum number of schema tool calls per generation round
    #[arg(long, default_value_t = 10)]
    pub max_tool_calls: u32,

    /// Print debug logs
    #[arg(long, env = "DEBUG")]
    pub debug: bool,
}

/// Parse a single `model=deployment` mapping entry.
fn parse_model_mapping(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((model, deployment)) if !model.is_empty() && !deployment.is_empty() => {
            Ok((model.to_string(), deployment.to_string()))
        }
        _ => Err(format!(
            "invalid model mapping '{}', expected model=deployment",
            s
        )),
    }
}
