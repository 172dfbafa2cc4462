// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Manifest validation and application
//!
//! The generated YAML is checked for shape before anything touches the
//! cluster, then piped into `kubectl apply -f -`.

use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::error::{AssistantError, Result};
use crate::k8s::kubeconfig::kubeconfig_path;

/// Check that the text parses as YAML and that every non-empty document is a
/// mapping carrying a `kind`. At least one such document must be present.
pub fn validate_manifest(text: &str) -> Result<()> {
    let mut documents = 0;

    for document in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| AssistantError::Manifest(format!("invalid YAML: {}", e)))?;

        match value {
            serde_yaml::Value::Null => continue,
            serde_yaml::Value::Mapping(mapping) => {
                if !mapping.contains_key(&serde_yaml::Value::String("kind".to_string())) {
                    return Err(AssistantError::Manifest(
                        "manifest document is missing a kind".to_string(),
                    ));
                }
                documents += 1;
            }
            _ => {
                return Err(AssistantError::Manifest(
                    "manifest document is not a mapping".to_string(),
                ));
            }
        }
    }

    if documents == 0 {
        return Err(AssistantError::Manifest("manifest is empty".to_string()));
    }

    Ok(())
}

/// Apply the manifest to the cluster by piping it into kubectl. Returns
/// kubectl's stdout on success.
pub async fn apply_manifest(config: &Config, manifest: &str) -> Result<String> {
    validate_manifest(manifest)?;

    let kubeconfig = kubeconfig_path(config.kubeconfig.as_deref());
    tracing::debug!("applying manifest with kubeconfig {}", kubeconfig.display());

    let mut command = tokio::process::Command::new("kubectl");
    command
        .arg("apply")
        .arg("-f")
        .arg("-")
        .arg("--kubeconfig")
        .arg(&kubeconfig);
    if let Some(namespace) = &config.namespace {
        command.arg("--namespace").arg(namespace);
    }
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(manifest.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(AssistantError::Kubectl(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
