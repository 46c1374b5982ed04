// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query complexity classification and model-tier routing.
//!
//! This crate provides:
//! - [`classify`]: lexical complexity labeling (zero-cost, zero-latency)
//! - [`ModelRouter`]: the fixed complexity-to-model mapping with config
//!   overrides
//!
//! The router runs before any LLM call; availability gating happens
//! downstream in the engine.

pub mod classifier;
pub mod router;

pub use classifier::{Complexity, classify};
pub use router::{ModelRouter, ModelTier, RoutingDecision};
