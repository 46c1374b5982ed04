// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration core for the deskbot support engine.
//!
//! This crate composes retrieval, classification, and routing into the one
//! entry point the server layer calls per chat request:
//! [`Engine::answer`]. It owns the stateful and stochastic pieces:
//! - [`AvailabilityTracker`]: per-model cooldown and rate-limit ledgers
//! - [`FallbackBuilder`]: retrieval-only responses when no model call lands
//!
//! The generation capability is injected; an engine without one (or whose
//! calls fail) still answers every query.

pub mod availability;
pub mod fallback;
pub mod orchestrator;

pub use availability::{AvailabilityTracker, Clock, SystemClock};
pub use fallback::{FallbackBuilder, FallbackResponse};
pub use orchestrator::{Engine, QueryResult};
