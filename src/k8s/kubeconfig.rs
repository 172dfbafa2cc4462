// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Kubeconfig path resolution and current-context lookup

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AssistantError, Result};

/// The kubeconfig to use: the explicit path when given, ~/.kube/config
/// otherwise.
pub fn kubeconfig_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dirs::home_dir()
            .unwrap_or_default()
            .join(".kube")
            .join("config"),
    }
}

#[derive(Debug, Deserialize)]
struct KubeconfigFile {
    #[serde(rename = "current-context", default)]
    current_context: Option<String>,
}

/// The name of the current context in the kubeconfig at `path`.
pub fn current_context_name(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)?;
    let parsed: KubeconfigFile = serde_yaml::from_str(&text)
        .map_err(|e| AssistantError::Config(format!("invalid kubeconfig: {}", e)))?;

    parsed
        .current_context
        .filter(|context| !context.is_empty())
        .ok_or_else(|| AssistantError::Config("kubeconfig has no current context".to_string()))
}
