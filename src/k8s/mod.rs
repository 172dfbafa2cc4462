// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Kubernetes integration for kubectl-assistant
//!
//! Schema source for the model's lookup tools, kubeconfig helpers, and
//! manifest application via kubectl.

pub mod apply;
pub mod kubeconfig;
pub mod schema;

pub use apply::*;
pub use kubeconfig::*;
pub use schema::*;
