// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! LLM module for kubectl-assistant
//!
//! Provides the completion client abstraction, the OpenAI/Azure
//! implementation, and the retry policy applied to provider calls.

pub mod openai;
pub mod provider;
pub mod retry;

pub use openai::*;
pub use provider::*;
pub use retry::*;
