// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Kubernetes OpenAPI schema source
//!
//! The schema is fetched either from the cluster itself (via
//! `kubectl get --raw /openapi/v2`) or from a configured HTTP URL; both are
//! exposed behind one JSON-producing trait. Lookups re-fetch on every call;
//! there is no caching.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AssistantError, Result};
use crate::k8s::kubeconfig::kubeconfig_path;

/// Abstract source of the cluster's OpenAPI v2 document. The document must
/// carry a top-level `definitions` map keyed by fully-qualified
/// resource-type name.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn fetch(&self) -> Result<Value>;
}

/// Fetches the schema from the cluster through kubectl.
pub struct ClusterSchemaSource {
    kubeconfig: PathBuf,
}

impl ClusterSchemaSource {
    pub fn new(kubeconfig: PathBuf) -> Self {
        Self { kubeconfig }
    }
}

#[async_trait]
impl SchemaSource for ClusterSchemaSource {
    async fn fetch(&self) -> Result<Value> {
        tracing::debug!("Fetching schema from Kubernetes API server");
        let output = tokio::process::Command::new("kubectl")
            .arg("get")
            .arg("--raw")
            .arg("/openapi/v2")
            .arg("--kubeconfig")
            .arg(&self.kubeconfig)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AssistantError::Kubectl(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// Fetches the schema from a configured HTTP URL.
pub struct UrlSchemaSource {
    client: reqwest::Client,
    url: String,
}

impl UrlSchemaSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SchemaSource for UrlSchemaSource {
    async fn fetch(&self) -> Result<Value> {
        tracing::debug!("Fetching schema from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Pick the schema source implied by the configuration.
pub fn schema_source(config: &Config) -> Arc<dyn SchemaSource> {
    match &config.k8s_openapi_url {
        Some(url) => Arc::new(UrlSchemaSource::new(url.clone())),
        None => Arc::new(ClusterSchemaSource::new(kubeconfig_path(
            config.kubeconfig.as_deref(),
        ))),
    }
}

fn definitions(schema: &Value) -> Result<&serde_json::Map<String, Value>> {
    schema
        .get("definitions")
        .and_then(Value::as_object)
        .ok_or_else(|| AssistantError::Schema("unable to assert schema definitions".to_string()))
}

/// Fully-qualified resource names whose definition key contains the query,
/// case-insensitively, in definition-map iteration order.
pub async fn find_resource_names(
    source: &dyn SchemaSource,
    resource_name: &str,
) -> Result<Vec<String>> {
    let schema = source.fetch().await?;
    tracing::debug!("fetching resource name {}", resource_name);

    let needle = resource_name.to_lowercase();
    Ok(definitions(&schema)?
        .keys()
        .filter(|key| key.to_lowercase().contains(&needle))
        .cloned()
        .collect())
}

/// The schema object for an exact fully-qualified resource type.
pub async fn schema_for_resource(source: &dyn SchemaSource, resource_type: &str) -> Result<Value> {
    let schema = source.fetch().await?;
    tracing::debug!("fetching resource schema {}", resource_type);

    let resource = definitions(&schema)?
        .get(resource_type)
        .cloned()
        .ok_or_else(|| AssistantError::Schema("unable to find resource schema".to_string()))?;

    if !resource.is_object() {
        return Err(AssistantError::Schema(
            "unable to assert resource schema".to_string(),
        ));
    }

    Ok(resource)
}
