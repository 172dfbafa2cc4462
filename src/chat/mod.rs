// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Conversation engine for kubectl-assistant
//!
//! Owns the transcript and drives the completion/tool-calling loop until the
//! model produces a final manifest.

pub mod engine;
pub mod transcript;

pub use engine::*;
pub use transcript::*;
