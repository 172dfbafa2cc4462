// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! End-to-end generation flow against a mock OpenAI server
//!
//! Exercises the real HTTP client, the retry policy, the tool registry, and
//! the conversation engine together; only the schema source and the server
//! are substituted.

use async_trait::async_trait;
use clap::Parser;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kubectl_assistant::chat::ChatEngine;
use kubectl_assistant::cli::Cli;
use kubectl_assistant::config::Config;
use kubectl_assistant::error::Result;
use kubectl_assistant::k8s::SchemaSource;
use kubectl_assistant::llm::{is_retryable, with_retry, CompletionClient, OpenAiClient, RetryConfig};
use kubectl_assistant::tools::{FindSchemaNames, GetSchema, ToolRegistry};

struct FixtureSource;

#[async_trait]
impl SchemaSource for FixtureSource {
    async fn fetch(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "definitions": {
                "io.k8s.api.core.v1.Pod": {
                    "description": "Pod is a collection of containers",
                    "properties": {"kind": {"type": "string"}}
                },
                "io.k8s.api.core.v1.PodSpec": {
                    "description": "PodSpec is a description of a pod"
                }
            }
        }))
    }
}

fn config(endpoint: &str, args: &[&str]) -> Config {
    let mut full = vec!["kubectl-assistant", "--openai-endpoint", endpoint];
    full.extend_from_slice(args);
    full.push("an");
    full.push("nginx pod");
    let mut cli = Cli::parse_from(full);
    cli.openai_api_key = Some("sk-test".to_string());
    Config::from_cli(&cli).unwrap()
}

fn engine(config: &Config) -> ChatEngine {
    let client = Arc::new(OpenAiClient::new(config));
    let mut registry = ToolRegistry::new();
    if config.use_k8s_api {
        let source: Arc<dyn SchemaSource> = Arc::new(FixtureSource);
        registry.register(Arc::new(FindSchemaNames::new(source.clone())));
        registry.register(Arc::new(GetSchema::new(source)));
    }
    ChatEngine::new(client, registry, config)
}

fn final_text(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {"content": content}, "finish_reason": "stop"}]
    }))
}

fn tool_call(name: &str, arguments: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {
            "content": null,
            "tool_calls": [{"id": "call_1", "type": "function",
                            "function": {"name": name, "arguments": arguments}}]
        }, "finish_reason": "tool_calls"}]
    }))
}

#[tokio::test]
async fn test_direct_generation_strips_fences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(final_text("```yaml\nkind: Pod\n```"))
        .mount(&server)
        .await;

    let config = config(&server.uri(), &[]);
    let manifest = engine(&config)
        .run(&["an nginx pod".to_string()])
        .await
        .unwrap();

    assert_eq!(manifest, "\nkind: Pod\n");
}

#[tokio::test]
async fn test_tool_call_round_trip_feeds_result_back() {
    let server = MockServer::start().await;

    // First round asks for a schema-name lookup, second returns the manifest.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(tool_call(
            "findSchemaNames",
            "{\"resourceName\":\"pod\"}",
        ))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(final_text("kind: Pod"))
        .mount(&server)
        .await;

    let config = config(&server.uri(), &["--use-k8s-api"]);
    let manifest = engine(&config)
        .run(&["an nginx pod".to_string()])
        .await
        .unwrap();

    assert_eq!(manifest, "kind: Pod");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["tool_choice"], "auto");
    assert_eq!(first["tools"][0]["function"]["name"], "findSchemaNames");
    assert_eq!(first["tools"][1]["function"]["name"], "getSchema");

    // The second prompt carries the newline-joined lookup result.
    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let prompt = second["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("io.k8s.api.core.v1.Pod\nio.k8s.api.core.v1.PodSpec"));
}

#[tokio::test]
async fn test_get_schema_result_is_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(tool_call(
            "getSchema",
            "{\"resourceType\":\"io.k8s.api.core.v1.Pod\"}",
        ))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(final_text("kind: Pod"))
        .mount(&server)
        .await;

    let config = config(&server.uri(), &["--use-k8s-api"]);
    engine(&config)
        .run(&["an nginx pod".to_string()])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let prompt = second["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("\"description\":\"Pod is a collection of containers\""));
}

#[tokio::test]
async fn test_rate_limit_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(final_text("kind: Pod"))
        .mount(&server)
        .await;

    let config = config(&server.uri(), &[]);
    let client = OpenAiClient::new(&config);
    let retry = RetryConfig {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
    };

    let outcome = with_retry(
        || client.complete_chat("an nginx pod", 0.0, &[]),
        &retry,
        is_retryable,
        "chat completion",
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        kubectl_assistant::llm::CompletionOutcome::FinalText("kind: Pod".to_string())
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_authentication_failure_aborts_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = config(&server.uri(), &[]);
    let err = engine(&config)
        .run(&["an nginx pod".to_string()])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Authentication failed"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
