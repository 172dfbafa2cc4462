// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! kubectl-assistant entry point
//!
//! Parses the CLI, wires the completion client, tools, and engine together,
//! then loops: generate a manifest, ask the user, and either apply it,
//! discard it, or regenerate with the extra text they typed.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use kubectl_assistant::chat::ChatEngine;
use kubectl_assistant::cli::Cli;
use kubectl_assistant::config::Config;
use kubectl_assistant::confirm::{self, Decision};
use kubectl_assistant::error::{AssistantError, Result};
use kubectl_assistant::k8s::{apply_manifest, schema_source};
use kubectl_assistant::llm::OpenAiClient;
use kubectl_assistant::tools::{FindSchemaNames, GetSchema, ToolRegistry};

const SPINNER_CHARSET: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Dropping the run future on interrupt aborts any in-flight HTTP call or
    // backoff sleep.
    let result = tokio::select! {
        result = run(&cli) => result,
        _ = tokio::signal::ctrl_c() => Err(AssistantError::Interrupted),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "kubectl_assistant=debug"
    } else {
        "kubectl_assistant=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn log_debug_flags(config: &Config) {
    tracing::debug!("openai-endpoint: {}", config.openai_endpoint);
    tracing::debug!("openai-deployment-name: {}", config.openai_deployment_name);
    tracing::debug!("azure-openai-map: {:?}", config.azure_model_map);
    tracing::debug!("temperature: {}", config.temperature);
    tracing::debug!("use-k8s-api: {}", config.use_k8s_api);
    tracing::debug!("k8s-openapi-url: {:?}", config.k8s_openapi_url);
}

/// A spinner while the model is generating. Suppressed in debug and raw
/// modes so it does not interleave with log or pipeline output.
fn start_spinner(config: &Config, debug: bool) -> Option<ProgressBar> {
    if debug || config.raw {
        return None;
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner().tick_strings(SPINNER_CHARSET));
    bar.set_message("Processing...");
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    log_debug_flags(&config);

    let client = Arc::new(OpenAiClient::new(&config));

    let mut registry = ToolRegistry::new();
    if config.use_k8s_api {
        let source = schema_source(&config);
        registry.register(Arc::new(FindSchemaNames::new(source.clone())));
        registry.register(Arc::new(GetSchema::new(source)));
    }

    let engine = ChatEngine::new(client, registry, &config);

    let mut fragments = cli.prompt.clone();
    loop {
        let spinner = start_spinner(&config, cli.debug);
        let completion = engine.run(&fragments).await;
        if let Some(spinner) = &spinner {
            spinner.finish_and_clear();
        }
        let completion = completion?;

        if config.raw {
            println!("{}", completion);
            return Ok(());
        }

        println!(
            "✨ Attempting to apply the following manifest:\n{}",
            completion
        );

        match confirm::prompt_for_decision(&config).await? {
            Decision::Apply => {
                let output = apply_manifest(&config, &completion).await?;
                if !output.is_empty() {
                    println!("{}", output);
                }
                return Ok(());
            }
            Decision::DontApply => return Ok(()),
            Decision::Reprompt(text) => fragments.push(text),
        }
    }
}
