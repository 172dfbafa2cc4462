// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Apply confirmation prompt
//!
//! After a manifest is generated the user chooses to apply it, discard it, or
//! type free-form text that becomes additional prompt material for another
//! generation round.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::error::Result;
use crate::k8s::kubeconfig::{current_context_name, kubeconfig_path};

/// The user's answer to the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Apply the manifest to the cluster
    Apply,
    /// Discard the manifest and exit
    DontApply,
    /// Regenerate with this extra prompt text appended
    Reprompt(String),
}

/// Interpret one line of user input. Anything that is not an apply or
/// don't-apply answer is treated as reprompt text.
pub fn parse_decision(input: &str) -> Decision {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "a" | "apply" => Decision::Apply,
        "" | "d" | "n" | "no" | "don't apply" | "dont apply" => Decision::DontApply,
        _ => Decision::Reprompt(trimmed.to_string()),
    }
}

/// The prompt label, prefixed with the current kube context when the
/// kubeconfig resolves one.
pub fn prompt_label(config: &Config) -> String {
    let label = "Would you like to apply this? [Reprompt/Apply/Don't Apply]".to_string();
    let kubeconfig = kubeconfig_path(config.kubeconfig.as_deref());
    match current_context_name(&kubeconfig) {
        Ok(context) => format!("(context: {}) {}", context, label),
        Err(_) => label,
    }
}

/// Show the confirmation prompt and read the user's decision. Skipped
/// entirely when confirmation is not required.
pub async fn prompt_for_decision(config: &Config) -> Result<Decision> {
    if !config.require_confirmation {
        return Ok(Decision::Apply);
    }

    println!("{}", prompt_label(config));

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    reader.read_line(&mut line).await?;

    Ok(parse_decision(&line))
}
