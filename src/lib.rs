// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! kubectl-assistant - generate and apply Kubernetes manifests from natural language.
//!
//! This crate exposes the shared runtime used by the `kubectl-assistant` CLI
//! (`src/main.rs`).
//!
//! Architecture highlights:
//! - `chat`: the conversation engine driving completion and tool-call rounds
//! - `llm`: completion client abstraction, OpenAI/Azure implementation, retry
//! - `tools`: schema-lookup tools the model may call while generating
//! - `k8s`: cluster schema source, kubeconfig helpers, manifest apply
//! - `confirm`: the apply / don't-apply / reprompt decision prompt

pub mod chat;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod k8s;
pub mod llm;
pub mod tools;

pub use error::{AssistantError, Result};
